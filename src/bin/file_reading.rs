//! Filesystem-escape probe: reads files outside the sandbox root

use sandbox_probes::policy::HOME_VAR;
use sandbox_probes::probes::filesystem;
use sandbox_probes::{logging, Reporter};

fn main() {
    logging::init_logger();

    let home = std::env::var_os(HOME_VAR);
    filesystem::run(&mut Reporter::stdout(), home);
}
