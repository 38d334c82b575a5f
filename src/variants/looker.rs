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

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tf_provider::value::{Value, ValueList, ValueString};
use tf_provider::{
    map, Attribute, AttributeConstraint, AttributePath, AttributeType, Description, Diagnostics,
};

use crate::decoder::Discriminable;
use crate::enums::{GitAuthType, WireEnum};
use crate::error::{Error, Result};
use crate::variant::{missing_fields, optional_value, present, required_value, Variant, WireDto};

/// Looker instance, optionally linked to the Git repositories of its LookML projects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookerParameters {
    pub host: ValueString<'static>,
    pub git_connections: ValueList<Value<GitConnection>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitConnection {
    pub auth_type: Value<String>,
    pub branch: Value<String>,
    pub secret_id: Value<String>,
    pub url: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookerDto {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(rename = "gitConnections", skip_serializing_if = "Option::is_none")]
    pub git_connections: Option<Vec<GitConnectionDto>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitConnectionDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

const TAG: &str = "looker";

impl GitConnection {
    fn to_dto(&self, index: usize) -> Result<GitConnectionDto> {
        let field = |name: &str| format!("git_connections[{index}].{name}");
        let auth_type = required_value(TAG, &field("auth_type"), &self.auth_type)?;
        Ok(GitConnectionDto {
            auth_type: Some(GitAuthType::parse(&auth_type)?.as_str().to_owned()),
            branch: optional_value(TAG, &field("branch"), &self.branch)?,
            secret_id: Some(required_value(TAG, &field("secret_id"), &self.secret_id)?),
            url: Some(required_value(TAG, &field("url"), &self.url)?),
        })
    }

    fn from_dto(dto: &GitConnectionDto, index: usize) -> Result<Self> {
        let field = |name: &str| format!("gitConnections[{index}].{name}");
        let auth_type = dto.auth_type.as_deref().ok_or_else(|| {
            Error::malformed(TAG, format!("missing required field {}", field("authType")))
        })?;
        Ok(Self {
            auth_type: Value::Value(GitAuthType::parse(auth_type)?.as_str().to_owned()),
            branch: dto.branch.clone().map_or(Value::Null, Value::Value),
            secret_id: present(TAG, &field("secretId"), &dto.secret_id)?,
            url: present(TAG, &field("url"), &dto.url)?,
        })
    }
}

impl GitConnectionDto {
    fn check(&self, index: usize) -> std::result::Result<(), String> {
        let missing = [
            (self.auth_type.is_none(), "authType"),
            (self.secret_id.is_none(), "secretId"),
            (self.url.is_none(), "url"),
        ]
        .iter()
        .filter_map(|(missing, wire)| missing.then_some(*wire))
        .collect::<Vec<_>>();
        missing_fields(&missing).map_err(|reason| format!("gitConnections[{index}]: {reason}"))?;
        if let Some(auth_type) = &self.auth_type {
            GitAuthType::parse(auth_type)
                .map_err(|err| format!("gitConnections[{index}]: {err}"))?;
        }
        Ok(())
    }
}

impl Discriminable for LookerDto {
    fn type_tag(&self) -> Option<&str> {
        self.source_type.as_deref()
    }

    fn is_empty(&self) -> bool {
        self.source_type.is_none() && self.host.is_none() && self.git_connections.is_none()
    }

    fn check(&self) -> std::result::Result<(), String> {
        if self.host.is_none() {
            return missing_fields(&["host"]);
        }
        for (index, connection) in self.git_connections.iter().flatten().enumerate() {
            connection.check(index)?;
        }
        Ok(())
    }
}

impl WireDto for LookerDto {
    fn set_type_tag(&mut self, tag: String) {
        self.source_type = Some(tag);
    }
}

impl Variant for LookerParameters {
    const TAG: &'static str = TAG;
    const REQUIRES_CREDENTIAL: bool = true;

    type Dto = LookerDto;

    fn description() -> &'static str {
        "Parameters of a `looker` source"
    }

    fn attributes() -> HashMap<String, Attribute> {
        map! {
            "host" => Attribute {
                attr_type: AttributeType::String,
                description: Description::plain("Hostname of the Looker instance"),
                constraint: AttributeConstraint::Required,
                ..Default::default()
            },
            "git_connections" => Attribute {
                attr_type: AttributeType::AttributeList(map! {
                    "auth_type" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain(
                            "One of HTTP_AUTHORIZATION_HEADER, USER_PASSWORD or SSH",
                        ),
                        constraint: AttributeConstraint::Required,
                        ..Default::default()
                    },
                    "branch" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Branch to follow, the default branch if unset"),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                    "secret_id" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Secret holding the Git credentials"),
                        constraint: AttributeConstraint::Required,
                        ..Default::default()
                    },
                    "url" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("URL of the repository"),
                        constraint: AttributeConstraint::Required,
                        ..Default::default()
                    },
                }),
                description: Description::plain(
                    "Git repositories of the LookML projects, in order",
                ),
                constraint: AttributeConstraint::Optional,
                ..Default::default()
            },
        }
    }

    fn to_dto(&self) -> Result<LookerDto> {
        let host = required_value(TAG, "host", &self.host)?;
        let git_connections = match &self.git_connections {
            Value::Value(connections) => Some(
                connections
                    .iter()
                    .enumerate()
                    .map(|(index, connection)| match connection {
                        Value::Value(connection) => connection.to_dto(index),
                        Value::Null => Err(Error::malformed(
                            TAG,
                            format!("git_connections[{index}] is null"),
                        )),
                        Value::Unknown => Err(Error::malformed(
                            TAG,
                            format!("git_connections[{index}] is not known yet"),
                        )),
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Null => None,
            Value::Unknown => {
                return Err(Error::malformed(TAG, "git_connections is not known yet"));
            }
        };

        Ok(LookerDto {
            source_type: None,
            host: Some(host.into_owned()),
            git_connections,
        })
    }

    fn from_dto(dto: &LookerDto) -> Result<Self> {
        let host = dto
            .host
            .clone()
            .ok_or_else(|| Error::malformed(TAG, "missing required field host"))?;
        let git_connections = match &dto.git_connections {
            Some(connections) => Value::Value(
                connections
                    .iter()
                    .enumerate()
                    .map(|(index, connection)| {
                        GitConnection::from_dto(connection, index).map(Value::Value)
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => Value::Null,
        };
        Ok(Self {
            host: Value::Value(host.into()),
            git_connections,
        })
    }

    fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        let Value::Value(connections) = &self.git_connections else {
            return;
        };
        for (index, connection) in connections.iter().enumerate() {
            let Value::Value(GitConnection {
                auth_type: Value::Value(auth_type),
                ..
            }) = connection
            else {
                continue;
            };
            if let Err(err) = GitAuthType::parse(auth_type) {
                err.report(
                    diags,
                    attr_path
                        .clone()
                        .attribute("git_connections")
                        .index(index as i64)
                        .attribute("auth_type"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(auth_type: &str, url: &str) -> Value<GitConnection> {
        Value::Value(GitConnection {
            auth_type: Value::Value(auth_type.to_owned()),
            branch: Value::Null,
            secret_id: Value::Value("secret".to_owned()),
            url: Value::Value(url.to_owned()),
        })
    }

    fn looker(connections: Vec<Value<GitConnection>>) -> LookerParameters {
        LookerParameters {
            host: Value::Value("looker.example.com".into()),
            git_connections: Value::Value(connections),
        }
    }

    #[test]
    fn connections_keep_their_order() {
        let params = looker(vec![
            connection("SSH", "git@b"),
            connection("USER_PASSWORD", "https://a"),
            connection("HTTP_AUTHORIZATION_HEADER", "https://c"),
        ]);
        let dto = params.to_dto().unwrap();
        let urls = dto
            .git_connections
            .iter()
            .flatten()
            .map(|c| c.url.as_deref().unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(urls, ["git@b", "https://a", "https://c"]);
        assert_eq!(LookerParameters::from_dto(&dto).unwrap(), params);
    }

    #[test]
    fn absent_connections_stay_absent() {
        let params = LookerParameters {
            host: Value::Value("h".into()),
            git_connections: Value::Null,
        };
        let dto = params.to_dto().unwrap();
        assert_eq!(dto.git_connections, None);
        assert_eq!(LookerParameters::from_dto(&dto).unwrap(), params);
    }

    #[test]
    fn bogus_auth_type_rejected_outward() {
        let err = looker(vec![connection("bogus", "u")]).to_dto().unwrap_err();
        assert!(matches!(err, Error::InvalidEnum { ref value, .. } if value == "bogus"));
    }

    #[test]
    fn bogus_auth_type_rejected_inward() {
        let dto = LookerDto {
            source_type: Some("LOOKER".to_owned()),
            host: Some("h".to_owned()),
            git_connections: Some(vec![GitConnectionDto {
                auth_type: Some("bogus".to_owned()),
                branch: None,
                secret_id: Some("s".to_owned()),
                url: Some("u".to_owned()),
            }]),
        };
        let reason = dto.check().unwrap_err();
        assert!(reason.contains("\"bogus\""));
        assert!(LookerParameters::from_dto(&dto)
            .unwrap_err()
            .to_string()
            .contains("\"bogus\""));
    }

    #[test]
    fn missing_connection_field_fails_check() {
        let dto = LookerDto {
            source_type: Some("LOOKER".to_owned()),
            host: Some("h".to_owned()),
            git_connections: Some(vec![GitConnectionDto {
                auth_type: Some("SSH".to_owned()),
                ..Default::default()
            }]),
        };
        assert_eq!(
            dto.check(),
            Err("gitConnections[0]: missing required field(s): secretId, url".to_owned())
        );
    }

    #[test]
    fn validate_points_at_the_offending_connection() {
        let params = looker(vec![connection("SSH", "u"), connection("bogus", "u")]);
        let mut diags = Diagnostics::default();
        params.validate(&mut diags, AttributePath::new("parameters").attribute("looker"));
        assert_eq!(diags.errors.len(), 1);

        let mut diags = Diagnostics::default();
        looker(vec![connection("SSH", "u")]).validate(&mut diags, AttributePath::new("parameters"));
        assert!(diags.errors.is_empty());
    }
}
