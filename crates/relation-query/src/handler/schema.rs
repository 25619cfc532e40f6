//! Parameter declarations shared by the relation sources.

use crate::config::{HandlerSettings, Profile};
use crate::parameters::{GROUP_ADVANCED, ParameterBuilder, ParameterDefinition, ParameterType};

/// Groups for advanced parameters, if the host supports groups.
pub(crate) fn advanced(settings: &HandlerSettings) -> Vec<String> {
    if settings.advanced_groups {
        vec![GROUP_ADVANCED.to_string()]
    } else {
        Vec::new()
    }
}

/// `use_current_location`, owning `location_id` while switched off.
pub(crate) fn location() -> ParameterDefinition {
    ParameterDefinition::new(
        "use_current_location",
        ParameterType::CompoundBoolean { reverse: true },
    )
    .child(ParameterDefinition::new(
        "location_id",
        ParameterType::Location {
            allow_invalid: true,
        },
    ))
}

pub(crate) fn sort_type(options: &[(&str, &str)]) -> ParameterDefinition {
    ParameterDefinition::new(
        "sort_type",
        ParameterType::choice(options.iter().copied()),
    )
    .required()
}

pub(crate) fn sort_direction() -> ParameterDefinition {
    ParameterDefinition::new(
        "sort_direction",
        ParameterType::choice([("Descending", "desc"), ("Ascending", "asc")]),
    )
    .required()
}

pub(crate) fn only_main_locations(settings: &HandlerSettings) -> ParameterDefinition {
    ParameterDefinition::new("only_main_locations", ParameterType::Boolean)
        .default_value(true)
        .groups(advanced(settings))
}

/// `filter_by_content_type`, owning `content_types`, `content_types_filter`
/// and any source-specific children.
pub(crate) fn content_type_filter(
    settings: &HandlerSettings,
    extra: Vec<ParameterDefinition>,
) -> ParameterDefinition {
    let mut definition = ParameterDefinition::new(
        "filter_by_content_type",
        ParameterType::CompoundBoolean { reverse: false },
    )
    .groups(advanced(settings))
    .child(
        ParameterDefinition::new("content_types", ParameterType::ContentType { multiple: true })
            .groups(advanced(settings)),
    )
    .child(
        ParameterDefinition::new(
            "content_types_filter",
            ParameterType::choice([
                ("Include content types", "include"),
                ("Exclude content types", "exclude"),
            ]),
        )
        .required()
        .groups(advanced(settings)),
    );

    for child in extra {
        definition = definition.child(child);
    }
    definition
}

/// Explicit `limit` and `offset` parameters of the legacy profile.
pub(crate) fn pagination(builder: &mut dyn ParameterBuilder, settings: &HandlerSettings) {
    if settings.profile != Profile::Legacy {
        return;
    }

    builder.add(ParameterDefinition::new(
        "limit",
        ParameterType::Integer { min: Some(0) },
    ));
    builder.add(ParameterDefinition::new(
        "offset",
        ParameterType::Integer { min: Some(0) },
    ));
}
