//! Reference catalog loading from catalog.toml
//!
//! The catalog is the read-only pricing reference data consumed by the
//! pricing engine: event function definitions, album configuration, pricing
//! configuration, video add-ons and complimentary items. It is loaded once
//! at startup and treated as immutable for the lifetime of the process; a
//! malformed catalog is a startup error, never a pricing-time error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Display grouping for a bookable function in the selector UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionCategory {
    /// Primary ceremonies (wedding, engagement, reception)
    Main,
    /// Pre/post-event functions (haldi, mehendi, sangeet)
    Additional,
    /// Everything else (birthdays, baptisms, newborn shoots)
    #[default]
    Other,
}

/// Definition of a bookable event function
///
/// The flat price covers `included_hours` of coverage by
/// `included_photographers` + `included_cinematographers`; anything beyond
/// those baselines is billed as overage by the pricing engine.
#[derive(Debug, Deserialize, Clone)]
pub struct EventFunctionDefinition {
    /// Unique identifier (slug) referenced by draft selections
    pub id: String,
    /// Display label
    pub label: String,
    /// Selector grouping
    #[serde(default)]
    pub category: FunctionCategory,
    /// Coverage hours already included in the flat price
    pub included_hours: f64,
    /// Flat base price in whole currency units
    pub flat_price: i64,
    /// Photographer headcount included in the flat price
    pub included_photographers: u32,
    /// Cinematographer headcount included in the flat price
    pub included_cinematographers: u32,
    /// Charge per hour beyond `included_hours`, whole currency units
    pub extra_hour_rate: i64,
}

/// Album sizing and pricing constants
#[derive(Debug, Deserialize, Clone)]
pub struct AlbumConfiguration {
    /// Minimum page count; also the page count of the base price
    pub base_pages: u32,
    /// Price of a single album at `base_pages`
    pub base_price_single: i64,
    /// Charge per `pages_increment` extra pages
    pub per_10_pages_cost: i64,
    /// Multiplier applied to base+extra for the two-album variant
    pub double_album_multiplier: f64,
    /// Step in which pages can be added above `base_pages`
    pub pages_increment: u32,
}

/// Global pricing constants
#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfiguration {
    /// Flat fee per crew member beyond a function's included headcount,
    /// regardless of role
    pub extra_crew_flat_fee: i64,
    /// Tax applied to the subtotal, in percent
    pub tax_percentage: f64,
    /// Share of the total due at booking, in percent
    pub advance_percentage: f64,
}

/// Definition of a purchasable video add-on
#[derive(Debug, Deserialize, Clone)]
pub struct VideoAddonDefinition {
    /// Unique identifier (slug) referenced by draft selections
    pub id: String,
    /// Display label
    pub label: String,
    /// Short marketing description
    #[serde(default)]
    pub description: String,
    /// Price in whole currency units
    pub price: i64,
}

/// Definition of a complimentary item the client may pick at no charge
#[derive(Debug, Deserialize, Clone)]
pub struct ComplimentaryItemDefinition {
    /// Unique identifier (slug)
    pub id: String,
    /// Display label
    pub label: String,
    /// Short description
    #[serde(default)]
    pub description: String,
}

/// The complete reference catalog, parsed from catalog.toml
#[derive(Debug, Deserialize, Clone)]
pub struct Catalog {
    /// Bookable event functions
    pub functions: Vec<EventFunctionDefinition>,
    /// Album configuration constants
    pub album: AlbumConfiguration,
    /// Global pricing constants
    pub pricing: PricingConfiguration,
    /// Video add-on definitions
    #[serde(default)]
    pub video_addons: Vec<VideoAddonDefinition>,
    /// Complimentary item definitions
    #[serde(default)]
    pub complimentary_items: Vec<ComplimentaryItemDefinition>,
}

impl Catalog {
    /// All event function definitions, in catalog order.
    #[must_use]
    pub fn function_definitions(&self) -> &[EventFunctionDefinition] {
        &self.functions
    }

    /// The album configuration constants.
    #[must_use]
    pub fn album_configuration(&self) -> &AlbumConfiguration {
        &self.album
    }

    /// The global pricing constants.
    #[must_use]
    pub fn pricing_configuration(&self) -> &PricingConfiguration {
        &self.pricing
    }

    /// All video add-on definitions, in catalog order.
    #[must_use]
    pub fn video_addon_definitions(&self) -> &[VideoAddonDefinition] {
        &self.video_addons
    }

    /// All complimentary item definitions, in catalog order.
    #[must_use]
    pub fn complimentary_item_definitions(&self) -> &[ComplimentaryItemDefinition] {
        &self.complimentary_items
    }

    /// Checks structural invariants that the pricing engine relies on.
    ///
    /// # Errors
    /// Returns `Error::Config` on duplicate or empty ids, a zero pages
    /// increment, negative money amounts, or a non-finite numeric field.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for function in &self.functions {
            if function.id.trim().is_empty() {
                return Err(Error::Config {
                    message: "Function definition with empty id".to_string(),
                });
            }
            if !seen.insert(function.id.as_str()) {
                return Err(Error::Config {
                    message: format!("Duplicate function definition id: {}", function.id),
                });
            }
            if function.flat_price < 0 || function.extra_hour_rate < 0 {
                return Err(Error::Config {
                    message: format!("Negative price on function {}", function.id),
                });
            }
            if !function.included_hours.is_finite() || function.included_hours < 0.0 {
                return Err(Error::Config {
                    message: format!("Invalid included_hours on function {}", function.id),
                });
            }
        }

        let mut seen = HashSet::new();
        for addon in &self.video_addons {
            if !seen.insert(addon.id.as_str()) {
                return Err(Error::Config {
                    message: format!("Duplicate video add-on id: {}", addon.id),
                });
            }
            if addon.price < 0 {
                return Err(Error::Config {
                    message: format!("Negative price on video add-on {}", addon.id),
                });
            }
        }

        if self.album.pages_increment == 0 {
            return Err(Error::Config {
                message: "album.pages_increment must be greater than zero".to_string(),
            });
        }
        if self.album.base_price_single < 0 || self.album.per_10_pages_cost < 0 {
            return Err(Error::Config {
                message: "Negative album price".to_string(),
            });
        }
        if !self.album.double_album_multiplier.is_finite()
            || self.album.double_album_multiplier <= 0.0
        {
            return Err(Error::Config {
                message: "album.double_album_multiplier must be a positive number".to_string(),
            });
        }

        if self.pricing.extra_crew_flat_fee < 0 {
            return Err(Error::Config {
                message: "pricing.extra_crew_flat_fee must be non-negative".to_string(),
            });
        }
        for (name, value) in [
            ("pricing.tax_percentage", self.pricing.tax_percentage),
            ("pricing.advance_percentage", self.pricing.advance_percentage),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config {
                    message: format!("{name} must be a non-negative number"),
                });
            }
        }

        Ok(())
    }
}

/// Loads and validates the reference catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or required fields are missing
/// - A structural invariant fails (see [`Catalog::validate`])
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    let catalog: Catalog = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })?;

    catalog.validate()?;
    Ok(catalog)
}

/// Loads the catalog from `CATALOG_PATH`, falling back to ./catalog.toml
///
/// # Errors
/// Same failure modes as [`load_catalog`].
pub fn load_default_catalog() -> Result<Catalog> {
    let path = std::env::var("CATALOG_PATH").unwrap_or_else(|_| "catalog.toml".to_string());
    load_catalog(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn sample_toml() -> &'static str {
        r#"
            [[functions]]
            id = "wedding"
            label = "Wedding"
            category = "main"
            included_hours = 8.0
            flat_price = 20000
            included_photographers = 2
            included_cinematographers = 2
            extra_hour_rate = 1000

            [[functions]]
            id = "haldi"
            label = "Haldi"
            category = "additional"
            included_hours = 3.0
            flat_price = 6000
            included_photographers = 1
            included_cinematographers = 1
            extra_hour_rate = 800

            [album]
            base_pages = 60
            base_price_single = 8000
            per_10_pages_cost = 500
            double_album_multiplier = 1.8
            pages_increment = 10

            [pricing]
            extra_crew_flat_fee = 8000
            tax_percentage = 18.0
            advance_percentage = 30.0

            [[video_addons]]
            id = "highlight-video"
            label = "Highlight Video"
            description = "3-5 minute cinematic highlight reel"
            price = 5000

            [[complimentary_items]]
            id = "table-top-calendar"
            label = "Table Top Calendar"
            description = "12-month desk calendar"
        "#
    }

    #[test]
    fn test_parse_catalog() {
        let catalog: Catalog = toml::from_str(sample_toml()).unwrap();
        catalog.validate().unwrap();

        assert_eq!(catalog.function_definitions().len(), 2);
        assert_eq!(catalog.function_definitions()[0].id, "wedding");
        assert_eq!(catalog.function_definitions()[0].flat_price, 20000);
        assert_eq!(
            catalog.function_definitions()[0].category,
            FunctionCategory::Main
        );
        assert_eq!(
            catalog.function_definitions()[1].category,
            FunctionCategory::Additional
        );

        assert_eq!(catalog.album_configuration().base_pages, 60);
        assert_eq!(catalog.album_configuration().double_album_multiplier, 1.8);
        assert_eq!(catalog.pricing_configuration().extra_crew_flat_fee, 8000);

        assert_eq!(catalog.video_addon_definitions().len(), 1);
        assert_eq!(catalog.video_addon_definitions()[0].price, 5000);
        assert_eq!(catalog.complimentary_item_definitions().len(), 1);
    }

    #[test]
    fn test_category_defaults_to_other() {
        let toml_str = r#"
            [[functions]]
            id = "birthday"
            label = "Birthday"
            included_hours = 4.0
            flat_price = 8000
            included_photographers = 1
            included_cinematographers = 0
            extra_hour_rate = 500

            [album]
            base_pages = 60
            base_price_single = 8000
            per_10_pages_cost = 500
            double_album_multiplier = 1.8
            pages_increment = 10

            [pricing]
            extra_crew_flat_fee = 8000
            tax_percentage = 18.0
            advance_percentage = 30.0
        "#;
        let catalog: Catalog = toml::from_str(toml_str).unwrap();
        assert_eq!(catalog.functions[0].category, FunctionCategory::Other);
        assert!(catalog.video_addon_definitions().is_empty());
    }

    #[test]
    fn test_duplicate_function_id_rejected() {
        let mut catalog: Catalog = toml::from_str(sample_toml()).unwrap();
        let duplicate = catalog.functions[0].clone();
        catalog.functions.push(duplicate);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_zero_pages_increment_rejected() {
        let mut catalog: Catalog = toml::from_str(sample_toml()).unwrap();
        catalog.album.pages_increment = 0;
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut catalog: Catalog = toml::from_str(sample_toml()).unwrap();
        catalog.functions[0].flat_price = -1;
        assert!(catalog.validate().is_err());
    }
}
