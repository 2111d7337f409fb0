use std::fmt;
use std::path::{Path, PathBuf};

use crate::dates::date_from_doy;
use crate::order::OrderError;
use crate::sensor::{SensorDescriptor, SensorFamily};

const MODIS_HOST: &str = "e4ftl01.cr.usgs.gov";
const ARCHIVE_EXTENSION: &str = ".tar.gz";

/// Where the source data for a product lives: a locally staged archive, a
/// remote MODIS archive URL, or nothing at all for plot requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadLocator {
    File(PathBuf),
    Http(String),
    Null,
}

impl fmt::Display for DownloadLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadLocator::File(path) => write!(f, "file://{}", path.display()),
            DownloadLocator::Http(url) => write!(f, "{}", url),
            DownloadLocator::Null => write!(f, "null"),
        }
    }
}

/// Resolves the source-data location for a product.
///
/// Landsat products must already be staged under `data_root`; a missing
/// archive is a terminal batch error. MODIS products are fetched over HTTP
/// by the mapper, so only the URL is computed here.
pub fn resolve_source(
    descriptor: &SensorDescriptor,
    product_id: &str,
    data_root: &Path,
) -> Result<DownloadLocator, OrderError> {
    match descriptor.family() {
        SensorFamily::Plot => Ok(DownloadLocator::Null),
        family if family.is_modis() => {
            Ok(DownloadLocator::Http(modis_url(descriptor, product_id)?))
        }
        _ => {
            let path = data_root
                .join(descriptor.code())
                .join(format!("{}{}", product_id, ARCHIVE_EXTENSION));

            if !path.is_file() {
                return Err(OrderError::MissingSourceData { path });
            }

            Ok(DownloadLocator::File(path))
        }
    }
}

fn modis_url(descriptor: &SensorDescriptor, product_id: &str) -> Result<String, OrderError> {
    let invalid = |reason: &str| OrderError::InvalidProductId {
        product_id: product_id.to_string(),
        reason: reason.to_string(),
    };

    let acquisition = descriptor
        .modis()
        .ok_or_else(|| invalid("not a MODIS product"))?;

    let base_path = match descriptor.family() {
        SensorFamily::Terra => "/MOLT",
        SensorFamily::Aqua => "/MOLA",
        _ => return Err(invalid("not a MODIS product")),
    };

    let archive_date = date_from_doy(acquisition.year(), acquisition.doy())
        .ok_or_else(|| invalid("acquisition day-of-year is out of range"))?;

    Ok(format!(
        "http://{}{}/{}.{}/{}/{}.hdf",
        MODIS_HOST,
        base_path,
        acquisition.short_name(),
        acquisition.version(),
        archive_date.format("%Y.%m.%d"),
        product_id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_landsat_staged_file() {
        let dir = tempdir().unwrap();
        let product_id = "LE70420332015090EDC00";

        let sensor_dir = dir.path().join("LE7");
        std::fs::create_dir(&sensor_dir).unwrap();
        let archive = sensor_dir.join(format!("{product_id}.tar.gz"));
        File::create(&archive).unwrap();

        let descriptor = SensorDescriptor::resolve(product_id).unwrap();
        let locator = resolve_source(&descriptor, product_id, dir.path()).unwrap();

        assert_eq!(locator, DownloadLocator::File(archive.clone()));
        assert_eq!(locator.to_string(), format!("file://{}", archive.display()));
    }

    #[test]
    fn test_resolve_landsat_missing_file() {
        let dir = tempdir().unwrap();
        let product_id = "LE70420332015090EDC00";

        let descriptor = SensorDescriptor::resolve(product_id).unwrap();
        let err = resolve_source(&descriptor, product_id, dir.path()).unwrap_err();

        match err {
            OrderError::MissingSourceData { path } => {
                assert!(path.ends_with("LE7/LE70420332015090EDC00.tar.gz"));
            }
            other => panic!("expected MissingSourceData, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_modis_aqua_url() {
        let product_id = "MYD09GQ.A2020100.h09v06.006.2020104012345";

        let descriptor = SensorDescriptor::resolve(product_id).unwrap();
        let locator = resolve_source(&descriptor, product_id, Path::new("/unused")).unwrap();

        // Day 100 of 2020 is April 9th
        assert_eq!(
            locator,
            DownloadLocator::Http(format!(
                "http://e4ftl01.cr.usgs.gov/MOLA/MYD09GQ.006/2020.04.09/{product_id}.hdf"
            ))
        );
    }

    #[test]
    fn test_resolve_modis_terra_base_path() {
        let product_id = "MOD09GQ.A2015230.h09v06.005.2015234012739";

        let descriptor = SensorDescriptor::resolve(product_id).unwrap();
        let locator = resolve_source(&descriptor, product_id, Path::new("/unused")).unwrap();

        match locator {
            DownloadLocator::Http(url) => {
                assert!(url.contains("/MOLT/"));
                assert!(url.ends_with(".hdf"));
            }
            other => panic!("expected Http locator, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_plot_is_null() {
        let descriptor = SensorDescriptor::resolve("plot").unwrap();
        let locator = resolve_source(&descriptor, "plot", Path::new("/unused")).unwrap();

        assert_eq!(locator, DownloadLocator::Null);
        assert_eq!(locator.to_string(), "null");
    }
}
