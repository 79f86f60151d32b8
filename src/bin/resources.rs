//! Resource-exhaustion probe: 1 GiB of memory plus endless CPU burners.
//! Runs until the sandbox kills it.

use sandbox_probes::probes::resources;
use sandbox_probes::{logging, Reporter};

fn main() {
    logging::init_logger();
    resources::run(&mut Reporter::stdout());
}
