//! Goods-introduction document model.
//!
//! The wire names mix snake_case and camelCase (`importRequest`,
//! `participantInn`); serde renames pin them explicitly. Unset optional
//! fields go out as `null`.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Root document payload for `documents/create`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
    #[serde(rename = "description")]
    pub description: Option<Description>,

    #[serde(rename = "doc_id")]
    pub doc_id: Option<String>,

    #[serde(rename = "doc_status")]
    pub doc_status: Option<String>,

    #[serde(rename = "doc_type")]
    pub doc_type: Option<String>,

    #[serde(rename = "importRequest", default)]
    pub import_request: bool,

    #[serde(rename = "owner_inn")]
    pub owner_inn: Option<String>,

    #[serde(rename = "participant_inn")]
    pub participant_inn: Option<String>,

    #[serde(rename = "producer_inn")]
    pub producer_inn: Option<String>,

    #[serde(rename = "production_date", with = "date_format", default)]
    pub production_date: Option<NaiveDate>,

    #[serde(rename = "production_type")]
    pub production_type: Option<String>,

    #[serde(rename = "products", default)]
    pub products: Vec<Product>,

    #[serde(rename = "reg_date", with = "date_format", default)]
    pub reg_date: Option<NaiveDate>,

    #[serde(rename = "reg_number")]
    pub reg_number: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Description {
    #[serde(rename = "participantInn")]
    pub participant_inn: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Product {
    #[serde(rename = "certificate_document")]
    pub certificate_document: Option<String>,

    #[serde(rename = "certificate_document_date", with = "date_format", default)]
    pub certificate_document_date: Option<NaiveDate>,

    #[serde(rename = "certificate_document_number")]
    pub certificate_document_number: Option<String>,

    #[serde(rename = "owner_inn")]
    pub owner_inn: Option<String>,

    #[serde(rename = "producer_inn")]
    pub producer_inn: Option<String>,

    #[serde(rename = "production_date", with = "date_format", default)]
    pub production_date: Option<NaiveDate>,

    #[serde(rename = "tnved_code")]
    pub tnved_code: Option<String>,

    #[serde(rename = "uit_code")]
    pub uit_code: Option<String>,

    #[serde(rename = "uitu_code")]
    pub uitu_code: Option<String>,
}

/// Serialize a document to the UTF-8 JSON body sent to the endpoint.
pub fn to_json_bytes(document: &Document) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(document)?)
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_description(mut self, description: Description) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    #[must_use]
    pub fn with_doc_status(mut self, doc_status: impl Into<String>) -> Self {
        self.doc_status = Some(doc_status.into());
        self
    }

    #[must_use]
    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    #[must_use]
    pub fn with_import_request(mut self, import_request: bool) -> Self {
        self.import_request = import_request;
        self
    }

    #[must_use]
    pub fn with_owner_inn(mut self, owner_inn: impl Into<String>) -> Self {
        self.owner_inn = Some(owner_inn.into());
        self
    }

    #[must_use]
    pub fn with_participant_inn(mut self, participant_inn: impl Into<String>) -> Self {
        self.participant_inn = Some(participant_inn.into());
        self
    }

    #[must_use]
    pub fn with_producer_inn(mut self, producer_inn: impl Into<String>) -> Self {
        self.producer_inn = Some(producer_inn.into());
        self
    }

    #[must_use]
    pub fn with_production_date(mut self, production_date: NaiveDate) -> Self {
        self.production_date = Some(production_date);
        self
    }

    #[must_use]
    pub fn with_production_type(mut self, production_type: impl Into<String>) -> Self {
        self.production_type = Some(production_type.into());
        self
    }

    /// Append one product, keeping insertion order.
    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    #[must_use]
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    #[must_use]
    pub fn with_reg_date(mut self, reg_date: NaiveDate) -> Self {
        self.reg_date = Some(reg_date);
        self
    }

    #[must_use]
    pub fn with_reg_number(mut self, reg_number: impl Into<String>) -> Self {
        self.reg_number = Some(reg_number.into());
        self
    }
}

impl Description {
    pub fn new(participant_inn: impl Into<String>) -> Self {
        Self {
            participant_inn: Some(participant_inn.into()),
        }
    }
}

impl Product {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_certificate_document(mut self, value: impl Into<String>) -> Self {
        self.certificate_document = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_certificate_document_date(mut self, value: NaiveDate) -> Self {
        self.certificate_document_date = Some(value);
        self
    }

    #[must_use]
    pub fn with_certificate_document_number(mut self, value: impl Into<String>) -> Self {
        self.certificate_document_number = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_owner_inn(mut self, value: impl Into<String>) -> Self {
        self.owner_inn = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_producer_inn(mut self, value: impl Into<String>) -> Self {
        self.producer_inn = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_production_date(mut self, value: NaiveDate) -> Self {
        self.production_date = Some(value);
        self
    }

    #[must_use]
    pub fn with_tnved_code(mut self, value: impl Into<String>) -> Self {
        self.tnved_code = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_uit_code(mut self, value: impl Into<String>) -> Self {
        self.uit_code = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_uitu_code(mut self, value: impl Into<String>) -> Self {
        self.uitu_code = Some(value.into());
        self
    }
}

/// `YYYY-MM-DD` codec for optional calendar dates.
///
/// Years outside 0000..=9999 would not fit ten characters and are refused.
pub(crate) mod date_format {
    use chrono::{Datelike, NaiveDate};
    use serde::{de, ser, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            None => serializer.serialize_none(),
            Some(date) => {
                if !(0..=9999).contains(&date.year()) {
                    return Err(ser::Error::custom(format!(
                        "date {} does not fit YYYY-MM-DD",
                        date
                    )));
                }
                serializer.serialize_str(&date.format(FORMAT).to_string())
            }
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(raw) if raw.len() != 10 => Err(de::Error::custom(format!(
                "expected YYYY-MM-DD, got {:?}",
                raw
            ))),
            Some(raw) => NaiveDate::parse_from_str(&raw, FORMAT)
                .map(Some)
                .map_err(de::Error::custom),
        }
    }
}
