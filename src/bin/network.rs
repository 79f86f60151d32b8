//! Network-egress probe: connects to a public resolver

use sandbox_probes::probes::network;
use sandbox_probes::{logging, Reporter};

fn main() {
    logging::init_logger();
    network::run(&mut Reporter::stdout());
}
