use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::selection::SelectionSet;
use crate::shared::error::GalleryError;
use crate::shared::orm::OrmService;

/// Arguments of `gallery.share.create_from_selector`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinkRequest {
    pub partner_id: i64,
    pub image_ids: Vec<i64>,
}

impl ShareLinkRequest {
    /// Validate the dialog input before any network call
    pub fn new(partner_id: Option<i64>, selection: &SelectionSet) -> Result<Self, GalleryError> {
        let partner_id = partner_id.filter(|id| *id > 0).ok_or_else(|| {
            GalleryError::MissingContext("Debes seleccionar un contacto".to_string())
        })?;
        if selection.is_empty() {
            return Err(GalleryError::MissingContext(
                "Selecciona al menos una imagen".to_string(),
            ));
        }
        let image_ids = selection
            .ids()
            .iter()
            .map(|id| {
                id.parse::<i64>()
                    .map_err(|_| GalleryError::Decode(format!("identificador inválido: {}", id)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            partner_id,
            image_ids,
        })
    }

    pub fn args(&self) -> Vec<Value> {
        vec![json!(self.partner_id), json!(self.image_ids)]
    }
}

/// Share record created for a contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    pub id: i64,
    pub name: String,
    pub url: String,
}

pub async fn create_share_link<O: OrmService>(
    orm: &O,
    request: &ShareLinkRequest,
) -> Result<ShareLink, GalleryError> {
    let value = orm
        .call("gallery.share", "create_from_selector", request.args())
        .await?;
    Ok(serde_json::from_value(value)?)
}
