//! # Label Entities
//!
//! The business records fed into a template, one per printed label. Two
//! shapes occur in this system: an inventory article and a shipping package.
//! Records are plain data supplied by the surrounding application; the
//! engine reads them and never mutates them (part stamping returns a copy).
//!
//! Field aliases accept the upstream API's Spanish key names, so records can
//! be fed straight through from the backend without a mapping layer.

use serde::{Deserialize, Serialize};

/// An inventory article, printed on shelf labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(alias = "nombre")]
    pub name: String,
    /// Internal code, also the barcode payload.
    #[serde(alias = "codigo")]
    pub code: String,
    /// Unit of measure, e.g. "PZA".
    #[serde(default, alias = "unidad")]
    pub unit: String,
    /// Single-letter status code.
    #[serde(default, alias = "estatus")]
    pub status: String,
    #[serde(default, alias = "fecha")]
    pub date: String,
    #[serde(default, alias = "precio")]
    pub list_price: Option<f64>,
    #[serde(default, alias = "distribuidor")]
    pub distributor_price: Option<f64>,
    #[serde(default, alias = "inventarioMaximo")]
    pub max_stock: Option<f64>,
}

/// A shipping package, printed on parcel labels. Multi-part shipments carry
/// a running `part_index` out of `part_count`, stamped per copy by the
/// dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Tracking folio, also the barcode payload.
    pub folio: String,
    #[serde(alias = "destinatario")]
    pub recipient: String,
    #[serde(default, alias = "direccion")]
    pub address: String,
    #[serde(default, alias = "ciudad")]
    pub city: String,
    #[serde(default, alias = "codigoPostal")]
    pub postal_code: String,
    #[serde(default, alias = "peso")]
    pub weight_kg: Option<f64>,
    #[serde(default, alias = "fecha")]
    pub date: String,
    #[serde(default, alias = "sucursal")]
    pub branch: String,
    /// 1-based part number within the shipment.
    #[serde(default = "one")]
    pub part_index: u32,
    #[serde(default = "one")]
    pub part_count: u32,
}

fn one() -> u32 {
    1
}

impl Default for Package {
    fn default() -> Self {
        Package {
            folio: String::new(),
            recipient: String::new(),
            address: String::new(),
            city: String::new(),
            postal_code: String::new(),
            weight_kg: None,
            date: String::new(),
            branch: String::new(),
            // A single-part shipment is part 1 of 1, never 0 of 0.
            part_index: 1,
            part_count: 1,
        }
    }
}

/// One business record ready to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LabelEntity {
    Article(Article),
    Package(Package),
}

impl LabelEntity {
    pub fn article(&self) -> Option<&Article> {
        match self {
            LabelEntity::Article(a) => Some(a),
            LabelEntity::Package(_) => None,
        }
    }

    pub fn package(&self) -> Option<&Package> {
        match self {
            LabelEntity::Package(p) => Some(p),
            LabelEntity::Article(_) => None,
        }
    }

    /// Copy of this entity with per-part fields stamped. Articles have no
    /// part fields, so the copy is identical.
    pub fn with_part(&self, index: u32, count: u32) -> LabelEntity {
        match self {
            LabelEntity::Article(a) => LabelEntity::Article(a.clone()),
            LabelEntity::Package(p) => {
                let mut p = p.clone();
                p.part_index = index;
                p.part_count = count;
                LabelEntity::Package(p)
            }
        }
    }

    /// The barcode payload for this entity: article code or package folio.
    pub fn barcode_payload(&self) -> &str {
        match self {
            LabelEntity::Article(a) => &a.code,
            LabelEntity::Package(p) => &p.folio,
        }
    }
}
