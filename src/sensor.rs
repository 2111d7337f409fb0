use std::fmt::Display;

use crate::order::OrderError;

/// Coarse sensor classification driving the PRODUCT_TYPE substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFamily {
    Tm,
    Etm,
    OliTirs,
    Terra,
    Aqua,
    Plot,
}

impl SensorFamily {
    pub fn product_type(&self) -> &'static str {
        match self {
            SensorFamily::Tm | SensorFamily::Etm | SensorFamily::OliTirs => "landsat",
            SensorFamily::Terra | SensorFamily::Aqua => "modis",
            SensorFamily::Plot => "plot",
        }
    }

    pub fn is_modis(&self) -> bool {
        matches!(self, SensorFamily::Terra | SensorFamily::Aqua)
    }
}

impl Display for SensorFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorFamily::Tm => write!(f, "tm"),
            SensorFamily::Etm => write!(f, "etm"),
            SensorFamily::OliTirs => write!(f, "olitirs"),
            SensorFamily::Terra => write!(f, "terra"),
            SensorFamily::Aqua => write!(f, "aqua"),
            SensorFamily::Plot => write!(f, "plot"),
        }
    }
}

// Prefix tables evaluated in fixed priority order: the 3-character legacy
// codes first, then the 4-character collection codes.
const LEGACY_CODES: &[(&str, SensorFamily)] = &[
    ("LT4", SensorFamily::Tm),
    ("LT5", SensorFamily::Tm),
    ("LE7", SensorFamily::Etm),
    ("LT8", SensorFamily::OliTirs),
    ("LC8", SensorFamily::OliTirs),
    ("LO8", SensorFamily::OliTirs),
    ("MOD", SensorFamily::Terra),
    ("MYD", SensorFamily::Aqua),
];

const COLLECTION_CODES: &[(&str, SensorFamily)] = &[
    ("LT04", SensorFamily::Tm),
    ("LT05", SensorFamily::Tm),
    ("LE07", SensorFamily::Etm),
    ("LT08", SensorFamily::OliTirs),
    ("LC08", SensorFamily::OliTirs),
    ("LO08", SensorFamily::OliTirs),
];

/// Acquisition metadata carried by MODIS product ids, shaped
/// `MOD09GQ.A2020100.h09v06.006.<production timestamp>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModisAcquisition {
    short_name: String,
    version: String,
    year: i32,
    doy: u32,
}

impl ModisAcquisition {
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn doy(&self) -> u32 {
        self.doy
    }
}

/// Read-only view over a product id: the matched sensor code, its family
/// and, for MODIS products, the parsed acquisition metadata.
///
/// Resolve once per product and pass the descriptor around; resolution
/// re-parses the id every time.
#[derive(Debug, Clone)]
pub struct SensorDescriptor {
    code: String,
    family: SensorFamily,
    modis: Option<ModisAcquisition>,
}

impl SensorDescriptor {
    pub fn resolve(product_id: &str) -> Result<SensorDescriptor, OrderError> {
        if product_id == "plot" {
            return Ok(SensorDescriptor {
                code: "plot".to_string(),
                family: SensorFamily::Plot,
                modis: None,
            });
        }

        let (code, family) = match_prefix(product_id)?;

        let modis = if family.is_modis() {
            Some(parse_modis_acquisition(product_id)?)
        } else {
            None
        };

        Ok(SensorDescriptor {
            code: code.to_string(),
            family,
            modis,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn family(&self) -> SensorFamily {
        self.family
    }

    pub fn modis(&self) -> Option<&ModisAcquisition> {
        self.modis.as_ref()
    }
}

fn match_prefix(product_id: &str) -> Result<(&'static str, SensorFamily), OrderError> {
    if let Some(prefix) = product_id.get(0..3) {
        let prefix = prefix.to_uppercase();
        if let Some((code, family)) = LEGACY_CODES.iter().find(|(code, _)| *code == prefix) {
            return Ok((*code, *family));
        }
    }

    if let Some(prefix) = product_id.get(0..4) {
        let prefix = prefix.to_uppercase();
        if let Some((code, family)) = COLLECTION_CODES.iter().find(|(code, _)| *code == prefix) {
            return Ok((*code, *family));
        }
    }

    let attempted = product_id.get(0..4).unwrap_or(product_id);
    Err(OrderError::UnknownSensor {
        prefix: attempted.to_string(),
    })
}

fn parse_modis_acquisition(product_id: &str) -> Result<ModisAcquisition, OrderError> {
    let invalid = |reason: &str| OrderError::InvalidProductId {
        product_id: product_id.to_string(),
        reason: reason.to_string(),
    };

    let mut segments = product_id.split('.');

    let short_name = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid("missing short name segment"))?;

    // The acquisition segment is AYYYYDDD, e.g. A2020100.
    let acquisition = segments
        .next()
        .and_then(|s| s.strip_prefix('A'))
        .filter(|s| s.len() == 7)
        .ok_or_else(|| invalid("missing or malformed acquisition date segment"))?;

    let year: i32 = acquisition
        .get(0..4)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| invalid("acquisition year is not numeric"))?;
    let doy: u32 = acquisition
        .get(4..7)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| invalid("acquisition day-of-year is not numeric"))?;

    let _tile = segments.next();
    let version = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid("missing collection version segment"))?;

    Ok(ModisAcquisition {
        short_name: short_name.to_string(),
        version: version.to_string(),
        year,
        doy,
    })
}
