use thiserror::Error;

use scope::ScopeCommand;

// Unknown verbs pass through verbatim; syntax rejection stays with the dispatcher.
const VERB_TABLE: &[(&str, &str)] = &[
    ("accept", "acceptHandoff"),
    ("alt", "amendAltitude"),
    ("ho", "handoff"),
    ("db", "moveDataBlock"),
    ("prop", "propagateDataBlock"),
    ("route", "route"),
    ("pad", "setScratchpad"),
    ("halo", "toggleHalo"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("expected `<verb> [arguments...] <aircraft>`, got only '{0}'")]
    MissingAircraft(String),
}

// Shape: <verb> [arguments...] <aircraft>; the trailing token names the aircraft.
pub fn parse_scope_input(raw: &str) -> Result<ScopeCommand, ParseError> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    if tokens.len() < 2 {
        return Err(ParseError::MissingAircraft(tokens[0].to_string()));
    }

    let verb = tokens[0];
    let aircraft_reference = tokens[tokens.len() - 1].to_string();
    let command_arguments = tokens[1..tokens.len() - 1]
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(ScopeCommand {
        aircraft_reference,
        command_function: wire_name_for_verb(verb),
        command_arguments,
    })
}

fn wire_name_for_verb(verb: &str) -> String {
    let lower = verb.to_ascii_lowercase();
    for (known, wire_name) in VERB_TABLE {
        if lower == *known {
            return (*wire_name).to_string();
        }
    }
    verb.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_map_to_wire_names() {
        let command = parse_scope_input("halo AAL123").expect("valid input");
        assert_eq!(command.command_function, "toggleHalo");
        assert_eq!(command.aircraft_reference, "AAL123");
        assert!(command.command_arguments.is_empty());
    }

    #[test]
    fn arguments_sit_between_verb_and_aircraft() {
        let command = parse_scope_input("db 3/2 AAL123").expect("valid input");
        assert_eq!(command.command_function, "moveDataBlock");
        assert_eq!(command.command_arguments, vec!["3/2".to_string()]);
        assert_eq!(command.aircraft_reference, "AAL123");
    }

    #[test]
    fn verb_matching_is_case_insensitive() {
        let command = parse_scope_input("HALO aal123").expect("valid input");
        assert_eq!(command.command_function, "toggleHalo");
        assert_eq!(command.aircraft_reference, "aal123");
    }

    #[test]
    fn unknown_verbs_pass_through_untouched() {
        let command = parse_scope_input("frobnicate AAL123").expect("valid input");
        assert_eq!(command.command_function, "frobnicate");
    }

    #[test]
    fn raw_wire_names_work_as_verbs() {
        let command = parse_scope_input("toggleHalo AAL123").expect("valid input");
        assert_eq!(command.command_function, "toggleHalo");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_scope_input("   "), Err(ParseError::Empty));
    }

    #[test]
    fn input_without_an_aircraft_is_rejected() {
        assert_eq!(
            parse_scope_input("halo"),
            Err(ParseError::MissingAircraft("halo".to_string()))
        );
    }

    #[test]
    fn multiple_arguments_are_kept_in_order() {
        let command = parse_scope_input("ho 19 KSFO UAL604").expect("valid input");
        assert_eq!(command.command_function, "handoff");
        assert_eq!(
            command.command_arguments,
            vec!["19".to_string(), "KSFO".to_string()]
        );
        assert_eq!(command.aircraft_reference, "UAL604");
    }
}
