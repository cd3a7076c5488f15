pub mod app;
pub mod sim;
pub mod terminal;
pub mod timer;
pub mod ui;
pub mod worker;

use argh::FromArgs;

#[derive(Debug, FromArgs, Clone)]
/// Terminal front-end for a time-correlated single photon counter
pub struct Cli {
    /// print version information
    #[argh(switch, short = 'v')]
    pub version: bool,
    /// tick period in ms
    #[argh(option, default = "250")]
    pub tick_rate: u64,
    /// use unicode graphics
    #[argh(option, default = "true")]
    pub enhanced_graphics: bool,
    /// settings file (JSON) to push at startup instead of the defaults
    #[argh(option)]
    pub config: Option<String>,
    /// histogram export path (default: timestamped .csv in the working dir)
    #[argh(option, short = 'o')]
    pub output: Option<String>,
    /// log file path
    #[argh(option, default = "String::from(\"pharpview.log\")")]
    pub log: String,
    /// base resolution of the simulated instrument in ps
    #[argh(option, default = "4")]
    pub base_resolution: u32,
    /// sync rate of the simulated instrument in Hz
    #[argh(option, default = "20e6")]
    pub sync_rate: f64,
}
