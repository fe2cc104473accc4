//! XML payloads for product write endpoints.
//!
//! Write calls carry a single `payload` form field holding
//! `<Request><Product>...</Product></Request>` behind an XML declaration.

use crate::error::LazadaError;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declaration the platform requires ahead of every payload.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Maximum SKUs in one create, update or price/quantity call.
pub const MAX_SKUS_PER_CALL: usize = 50;

/// Maximum image URLs per SKU.
pub const MAX_IMAGES_PER_SKU: usize = 8;

#[derive(Serialize, Deserialize)]
#[serde(rename = "Request")]
struct XmlRequest<P> {
    #[serde(rename = "Product")]
    product: P,
}

/// `<Skus><Sku/>...</Skus>` wrapper.
mod sku_list {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct Borrowed<'a, T> {
        #[serde(rename = "Sku")]
        sku: &'a [T],
    }

    #[derive(Deserialize)]
    struct Owned<T> {
        #[serde(rename = "Sku", default = "Vec::new")]
        sku: Vec<T>,
    }

    pub fn serialize<S: Serializer, T: Serialize>(items: &[T], s: S) -> Result<S::Ok, S::Error> {
        Borrowed { sku: items }.serialize(s)
    }

    pub fn deserialize<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Owned::deserialize(d).map(|list| list.sku)
    }
}

/// `<Images><Image/>...</Images>` wrapper.
mod image_list {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct Borrowed<'a> {
        #[serde(rename = "Image")]
        image: &'a [String],
    }

    #[derive(Deserialize)]
    struct Owned {
        #[serde(rename = "Image", default)]
        image: Vec<String>,
    }

    pub fn serialize<S: Serializer>(items: &[String], s: S) -> Result<S::Ok, S::Error> {
        Borrowed { image: items }.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Owned::deserialize(d).map(|list| list.image)
    }
}

/// Decimals as element text.
mod decimal_text {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Decimal, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
        let text = String::deserialize(d)?;
        text.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
    }

    pub mod option {
        use rust_decimal::Decimal;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(value: &Option<Decimal>, s: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => s.collect_str(v),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|text| text.trim().parse::<Decimal>().map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

fn encode<P: Serialize>(product: &P) -> Result<String, LazadaError> {
    let body = quick_xml::se::to_string(&XmlRequest { product })
        .map_err(|e| LazadaError::Payload(e.to_string()))?;
    Ok(format!("{}\n{}", XML_DECLARATION, body))
}

fn decode<P: DeserializeOwned>(xml: &str) -> Result<P, LazadaError> {
    quick_xml::de::from_str::<XmlRequest<P>>(xml)
        .map(|request| request.product)
        .map_err(|e| LazadaError::Payload(e.to_string()))
}

fn check_sku_count(count: usize) -> Result<(), LazadaError> {
    if count == 0 {
        return Err(LazadaError::InvalidRequest("payload has no SKUs".into()));
    }
    if count > MAX_SKUS_PER_CALL {
        return Err(LazadaError::InvalidRequest(format!(
            "{} SKUs exceeds the limit of {}",
            count, MAX_SKUS_PER_CALL
        )));
    }
    Ok(())
}

fn check_seller_sku(seller_sku: &str) -> Result<(), LazadaError> {
    if seller_sku.trim().is_empty() {
        return Err(LazadaError::InvalidRequest("SellerSku must not be empty".into()));
    }
    Ok(())
}

/// Product body for `/product/create` and `/product/update`.
///
/// `attributes` must hold `name`, `short_description` and `brand` unless
/// `associated_sku` attaches the SKUs to an existing product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    #[serde(rename = "PrimaryCategory", skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<i64>,

    #[serde(rename = "AssociatedSku", skip_serializing_if = "Option::is_none")]
    pub associated_sku: Option<String>,

    #[serde(rename = "Attributes", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    #[serde(rename = "Skus", with = "sku_list", default)]
    pub skus: Vec<CreateProductSku>,
}

/// One SKU of a product write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateProductSku {
    #[serde(rename = "SellerSku")]
    pub seller_sku: String,
    #[serde(with = "decimal_text")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Required when either special date is set.
    #[serde(
        with = "decimal_text::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub special_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_from_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_to_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(with = "decimal_text")]
    pub package_height: Decimal,
    #[serde(with = "decimal_text")]
    pub package_length: Decimal,
    #[serde(with = "decimal_text")]
    pub package_width: Decimal,
    #[serde(with = "decimal_text")]
    pub package_weight: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_content: Option<String>,
    #[serde(
        rename = "Images",
        with = "image_list",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub images: Vec<String>,
}

impl CreateProductRequest {
    /// Check SKU and image limits.
    pub fn validate(&self) -> Result<(), LazadaError> {
        check_sku_count(self.skus.len())?;

        for sku in &self.skus {
            check_seller_sku(&sku.seller_sku)?;

            if sku.images.len() > MAX_IMAGES_PER_SKU {
                return Err(LazadaError::InvalidRequest(format!(
                    "SKU {} has {} images, limit is {}",
                    sku.seller_sku,
                    sku.images.len(),
                    MAX_IMAGES_PER_SKU
                )));
            }

            let dated = sku.special_from_date.is_some() || sku.special_to_date.is_some();
            if dated && sku.special_price.is_none() {
                return Err(LazadaError::InvalidRequest(format!(
                    "SKU {} has special dates without special_price",
                    sku.seller_sku
                )));
            }
        }

        Ok(())
    }

    /// Validate and render the `payload` field value.
    pub fn to_payload(&self) -> Result<String, LazadaError> {
        self.validate()?;
        encode(self)
    }

    /// Parse a payload produced by [`Self::to_payload`].
    pub fn from_xml(xml: &str) -> Result<Self, LazadaError> {
        decode(xml)
    }
}

/// Body for `/product/price_quantity/update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePriceQuantityRequest {
    #[serde(rename = "Skus", with = "sku_list", default)]
    pub skus: Vec<PriceQuantitySku>,
}

/// Price and stock change for one SKU.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceQuantitySku {
    #[serde(rename = "SellerSku")]
    pub seller_sku: String,
    #[serde(
        rename = "Price",
        with = "decimal_text::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(
        rename = "SalePrice",
        with = "decimal_text::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sale_price: Option<Decimal>,
    /// `YYYY-MM-DD`
    #[serde(rename = "SaleStartDate", skip_serializing_if = "Option::is_none")]
    pub sale_start_date: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(rename = "SaleEndDate", skip_serializing_if = "Option::is_none")]
    pub sale_end_date: Option<String>,
    #[serde(rename = "Quantity", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

impl UpdatePriceQuantityRequest {
    pub fn validate(&self) -> Result<(), LazadaError> {
        check_sku_count(self.skus.len())?;
        self.skus
            .iter()
            .try_for_each(|sku| check_seller_sku(&sku.seller_sku))
    }

    pub fn to_payload(&self) -> Result<String, LazadaError> {
        self.validate()?;
        encode(self)
    }

    pub fn from_xml(xml: &str) -> Result<Self, LazadaError> {
        decode(xml)
    }
}

/// Check the seller SKU list for `/product/remove`.
pub(crate) fn check_remove_list(seller_skus: &[String]) -> Result<(), LazadaError> {
    check_sku_count(seller_skus.len())?;
    seller_skus.iter().try_for_each(|sku| check_seller_sku(sku))
}
