use tracing::{error, info, warn};

use std::fs;
use std::path::{Path, PathBuf};

use crate::dispatch::Dispatch;
use crate::order::{self, OrderDocument, OrderError};
use crate::render;
use crate::sensor::SensorDescriptor;
use crate::source;

/// Drives one batch: for each product, resolve the sensor, merge the
/// request over the template, resolve the source data, render the order
/// and hand it to the dispatcher.
///
/// Sequential by design. The transient artifact is a single slot shared
/// by every product in the batch and is removed when the batch ends,
/// whether it succeeded or not.
#[derive(Debug)]
pub struct BatchRunner<D: Dispatch> {
    template: OrderDocument,
    request: OrderDocument,
    order_id: String,
    data_root: PathBuf,
    artifact_path: PathBuf,
    keep_log: bool,
    dispatcher: D,
}

impl<D: Dispatch> BatchRunner<D> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        template: OrderDocument,
        request: OrderDocument,
        order_id: String,
        data_root: PathBuf,
        artifact_path: PathBuf,
        keep_log: bool,
        dispatcher: D,
    ) -> Self {
        Self {
            template,
            request,
            order_id,
            data_root,
            artifact_path,
            keep_log,
            dispatcher,
        }
    }

    pub fn run(&self, products: &[String]) -> Result<(), OrderError> {
        let result = self.run_products(products);

        // Unconditional cleanup of the transient artifact
        if self.artifact_path.exists()
            && let Err(e) = fs::remove_file(&self.artifact_path)
        {
            warn!(
                "Could not remove transient order [{}]: {}",
                self.artifact_path.display(),
                e
            );
        }

        result
    }

    fn run_products(&self, products: &[String]) -> Result<(), OrderError> {
        info!("Processing Products [{}]", products.join(", "));

        let mut dispatch_failed = false;

        for product_id in products {
            info!("Processing Product [{}]", product_id);

            let descriptor = SensorDescriptor::resolve(product_id)?;
            info!("Processing Sensor [{}]", descriptor.family());

            let merged = order::merge(&self.template, &self.request);

            let locator = source::resolve_source(&descriptor, product_id, &self.data_root)?;
            info!("Using Download Location [{}]", locator);

            let rendered = render::render(
                &merged,
                &self.order_id,
                product_id,
                descriptor.family().product_type(),
                &locator.to_string(),
            )?;

            info!("Creating [{}]", self.artifact_path.display());
            render::write_artifact(&rendered, &self.artifact_path)?;

            match self.dispatcher.dispatch(&self.artifact_path, self.keep_log) {
                Ok(output) => {
                    if !output.is_empty() {
                        info!("Mapper output:\n{}", output);
                    }
                }
                Err(e) => {
                    // Dispatch failures do not stop the remaining products
                    error!("Processing [{}] failed: {}", product_id, e);
                    dispatch_failed = true;
                }
            }
        }

        if dispatch_failed {
            return Err(OrderError::Dispatch(
                "one or more products failed to dispatch".to_string(),
            ));
        }

        Ok(())
    }
}

/// Reads a newline-delimited product list; the first blank line
/// terminates the list.
pub fn read_product_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, OrderError> {
    let contents = fs::read_to_string(path)?;

    let mut products = Vec::new();
    for line in contents.lines() {
        let product = line.trim();
        if product.is_empty() {
            break;
        }
        products.push(product.to_string());
    }

    Ok(products)
}
