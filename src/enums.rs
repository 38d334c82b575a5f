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

//! Closed enums exchanged as strings with both Terraform and the API

use std::fmt::{Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::utils::DisplayJoinable;

/// String mapping of a closed enum
///
/// `as_str` is total, `parse` fails on anything it does not know and names the offending value.
pub trait WireEnum: Sized + Copy + Eq + Debug + 'static {
    /// Name of the field, used in error messages
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| Error::InvalidEnum {
                field: Self::FIELD,
                value: value.to_owned(),
                expected: Self::ALL.iter().map(Self::as_str).join_with(", ").to_string(),
            })
    }
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident ($field:literal) { $($variant:ident => $text:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl WireEnum for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;
            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                Self::parse(&value).map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Authentication used by Looker to reach a Git repository
    GitAuthType ("auth_type") {
        HttpAuthorizationHeader => "HTTP_AUTHORIZATION_HEADER",
        UserPassword => "USER_PASSWORD",
        Ssh => "SSH",
    }
}

wire_enum! {
    /// TLS version negotiated with a MySQL server
    MysqlTlsVersion ("mysql_tls_version") {
        TlsV12 => "TLS_V_1_2",
        TlsV13 => "TLS_V_1_3",
    }
}
