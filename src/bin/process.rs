//! Longevity probe: runs for two minutes

use sandbox_probes::probes::longevity;
use sandbox_probes::{logging, Reporter};

fn main() {
    logging::init_logger();
    longevity::run(&mut Reporter::stdout());
}
