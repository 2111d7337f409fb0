mod batch;
mod cli;
mod dates;
mod dispatch;
mod order;
mod render;
mod sensor;
mod source;

use clap::Parser;
use tracing::{error, info, warn};

use std::env;
use std::path::{Path, PathBuf};

use batch::BatchRunner;
use cli::Args;
use dispatch::MapperDispatcher;
use order::OrderDocument;

const TEMPLATE_FILE: &str = "template.json";
const TMP_ORDER_FILE: &str = "tmp-test-order";
const DATA_DIR_VAR: &str = "DEV_DATA_DIRECTORY";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let Some(data_root) = env::var_os(DATA_DIR_VAR) else {
        warn!("Missing environment variable [{}]", DATA_DIR_VAR);
        return Err("please fix missing environment variables".into());
    };

    let request_file = format!("{}.json", args.request);
    if !Path::new(&request_file).is_file() {
        return Err(format!("request file [{}] does not exist", request_file).into());
    }

    let products = if args.plot {
        vec!["plot".to_string()]
    } else {
        let products_file = if args.master {
            format!("{}.master.products", args.request)
        } else {
            format!("{}.products", args.request)
        };

        if !Path::new(&products_file).is_file() {
            return Err(format!("no products file exists for [{}]", args.request).into());
        }

        batch::read_product_list(&products_file)?
    };

    let mut order_id = args.request.replace('\'', "");
    if args.pre {
        order_id.push_str("-PRE");
    }
    if args.post {
        order_id.push_str("-POST");
    }

    let template = OrderDocument::from_file(TEMPLATE_FILE)?;
    info!("Processing Request File [{}]", request_file);
    let request = OrderDocument::from_file(&request_file)?;

    let runner = BatchRunner::new(
        template,
        request,
        order_id,
        PathBuf::from(data_root),
        PathBuf::from(TMP_ORDER_FILE),
        args.keep_log,
        MapperDispatcher::new(args.mapper),
    );

    runner.run(&products).map_err(|e| {
        error!("Request [{}] failed to process", args.request);
        e.into()
    })
}
