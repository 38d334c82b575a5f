// This file is part of the terraform-provider-sources project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Source entity envelope around the parameters
//!
//! The parameters are kept as raw JSON until the registry discriminates them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tf_provider::{AttributePath, Diagnostics, Value};
use tracing::debug;
use uuid::Uuid;

use crate::decoder::Page;
use crate::parameters::{validate_credential, FlatParameters, ParametersDto};
use crate::registry::Registry;
use crate::resolver::resolve;
use crate::utils::WithValidate;

/// Reference to another entity, as embedded in a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub tags: Vec<Reference>,
    #[serde(default)]
    pub credentials: Option<Reference>,
    pub parameters: Box<RawValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub timezone: Option<String>,
    pub tags: Vec<Uuid>,
    pub credential: Option<Uuid>,
    pub parameters: FlatParameters,
}

impl Source {
    pub fn from_dto(registry: &Registry, dto: SourceDto) -> Result<Self> {
        let parameters = registry
            .decode_flat(&dto.parameters)
            .with_context(|| format!("cannot decode parameters of source {}", dto.id))?;
        debug!(id = %dto.id, source_type = ?parameters.source_type, "source decoded");
        Ok(Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            schedule: dto.schedule,
            timezone: dto.timezone,
            tags: dto.tags.into_iter().map(|tag| tag.id).collect(),
            credential: dto.credentials.map(|credential| credential.id),
            parameters,
        })
    }

    pub fn from_json(registry: &Registry, raw: &str) -> Result<Self> {
        let dto = serde_json::from_str::<SourceDto>(raw).context("invalid source payload")?;
        Self::from_dto(registry, dto)
    }

    /// Decode a page of sources, naming the first source that cannot be decoded
    pub fn from_page(registry: &Registry, raw: &str) -> Result<Vec<Self>> {
        let page = serde_json::from_str::<Page>(raw).context("invalid page of sources")?;
        page.data
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Self::from_json(registry, item.get())
                    .with_context(|| format!("cannot decode source #{index} of the page"))
            })
            .collect()
    }

    /// Check the parameters and the credential of the source
    pub fn validate(&self, registry: &Registry, diags: &mut Diagnostics) {
        self.parameters
            .validate(registry, diags, AttributePath::new("parameters"));
        if let Ok(handler) = resolve(registry, &self.parameters) {
            let credential = self
                .credential
                .map_or(Value::Null, |id| Value::Value(id.to_string()));
            validate_credential(handler, &credential, diags, AttributePath::new("credential"));
        }
    }
}

/// Payload creating a new source
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_id: Option<Uuid>,
    pub parameters: ParametersDto,
}

impl CreateSourceDto {
    pub fn new(
        registry: &Registry,
        name: impl Into<String>,
        parameters: &FlatParameters,
    ) -> crate::error::Result<Self> {
        let parameters = resolve(registry, parameters)?.to_create_dto(parameters)?;
        Ok(Self {
            name: name.into(),
            description: None,
            schedule: None,
            timezone: None,
            tag_ids: Vec::new(),
            credentials_id: None,
            parameters,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_schedule(mut self, schedule: impl Into<String>, timezone: impl Into<String>) -> Self {
        self.schedule = Some(schedule.into());
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Uuid>) -> Self {
        self.tag_ids.extend(tags);
        self
    }

    pub fn with_credential(mut self, credential: Uuid) -> Self {
        self.credentials_id = Some(credential);
        self
    }
}

/// Payload updating an existing source in place
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSourceDto {
    pub name: String,
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub timezone: Option<String>,
    pub tag_ids: Vec<Uuid>,
    pub credentials_id: Option<Uuid>,
    pub parameters: ParametersDto,
}

impl UpdateSourceDto {
    pub fn new(registry: &Registry, source: &Source) -> crate::error::Result<Self> {
        let parameters =
            resolve(registry, &source.parameters)?.to_update_dto(&source.parameters)?;
        Ok(Self {
            name: source.name.clone(),
            description: source.description.clone(),
            schedule: source.schedule.clone(),
            timezone: source.timezone.clone(),
            tag_ids: source.tags.clone(),
            credentials_id: source.credential,
            parameters,
        })
    }
}
