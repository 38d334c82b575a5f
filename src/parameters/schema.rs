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

use tf_provider::{Attribute, AttributeConstraint, AttributeType, Block, Description};

use crate::registry::Registry;
use crate::utils::WithSchema;

use super::FlatParameters;

impl WithSchema for FlatParameters {
    fn schema(registry: &Registry) -> Block {
        let mut attributes = registry
            .handlers()
            .map(|handler| {
                let shape = handler.field_shape();
                (
                    handler.schema_tag().to_owned(),
                    Attribute {
                        attr_type: AttributeType::AttributeSingle(shape.attributes),
                        description: shape.description,
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                )
            })
            .collect::<HashMap<_, _>>();

        attributes.insert(
            "source_type".to_owned(),
            Attribute {
                attr_type: AttributeType::String,
                description: Description::plain("Type of the source, derived from the parameters set"),
                constraint: AttributeConstraint::Computed,
                ..Default::default()
            },
        );

        Block {
            description: Description::plain("Parameters of the source, exactly one type must be set"),
            attributes,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_attribute_per_slot() {
        let registry = Registry::with_all_variants();
        let block = FlatParameters::schema(&registry);
        assert_eq!(block.attributes.len(), registry.all_tags().len() + 1);
        assert!(block.attributes.contains_key("source_type"));
        assert_eq!(
            block.attributes["bigquery"].constraint,
            AttributeConstraint::Optional
        );
    }

    #[test]
    fn slots_keep_field_constraints() {
        let block = FlatParameters::schema(&Registry::with_all_variants());
        let AttributeType::AttributeSingle(fields) = &block.attributes["bigquery"].attr_type else {
            panic!("bigquery parameters should be nested attributes");
        };
        assert_eq!(fields.len(), 3);
        assert_eq!(
            fields["billing_project_id"].constraint,
            AttributeConstraint::Optional
        );
        assert_eq!(fields["project_id"].constraint, AttributeConstraint::Required);

        let AttributeType::AttributeSingle(fields) = &block.attributes["looker"].attr_type else {
            panic!("looker parameters should be nested attributes");
        };
        assert_eq!(
            fields["git_connections"].constraint,
            AttributeConstraint::Optional
        );
        let AttributeType::AttributeList(connection) = &fields["git_connections"].attr_type else {
            panic!("git connections should be a list of nested attributes");
        };
        assert_eq!(connection["branch"].constraint, AttributeConstraint::Optional);
        for name in ["auth_type", "secret_id", "url"] {
            assert_eq!(connection[name].constraint, AttributeConstraint::Required, "{name}");
        }
    }
}
