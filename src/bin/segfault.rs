//! Fault-injection probe: dies by SIGSEGV

use sandbox_probes::logging;
use sandbox_probes::probes::fault;

fn main() {
    logging::init_logger();
    fault::run();
}
