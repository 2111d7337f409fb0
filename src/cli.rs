use clap::Parser;

use std::path::PathBuf;

/// Configures and executes a test order against the local environment.
#[derive(Parser, Debug)]
#[command(name = "order-runner", about = "Configures and executes a test order")]
pub struct Args {
    /// Request to process (base name of the .json request file)
    #[arg(long)]
    pub request: String,

    /// Keep the mapper log file
    #[arg(long)]
    pub keep_log: bool,

    /// Use the master products file
    #[arg(long)]
    pub master: bool,

    /// Generate plots instead of processing a products file
    #[arg(long)]
    pub plot: bool,

    /// Use a -PRE order suffix
    #[arg(long)]
    pub pre: bool,

    /// Use a -POST order suffix
    #[arg(long)]
    pub post: bool,

    /// Mapper executable fed with the rendered order on stdin
    #[arg(long, default_value = "./ondemand_mapper.py")]
    pub mapper: PathBuf,
}
