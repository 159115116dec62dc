pub mod logging;
pub mod scan_observer;
