use pathtable_core::Direction;

const KEYWORDS: [&str; 53] = [
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Name of the host enum constant for a direction.
pub(crate) const fn direction_constant(direction: Direction) -> &'static str {
    match direction {
        Direction::North => "NORTH",
        Direction::NorthEast => "NORTHEAST",
        Direction::East => "EAST",
        Direction::SouthEast => "SOUTHEAST",
        Direction::South => "SOUTH",
        Direction::SouthWest => "SOUTHWEST",
        Direction::West => "WEST",
        Direction::NorthWest => "NORTHWEST",
        Direction::Center => "CENTER",
    }
}

/// Whether `name` is usable as a class name.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !KEYWORDS.contains(&name)
}

/// Whether `name` is a dot-separated sequence of identifiers.
pub(crate) fn is_package(name: &str) -> bool {
    name.split('.').all(is_identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_reject_keywords_and_symbols() {
        assert!(is_identifier("BellmanFord20"));
        assert!(is_identifier("_Scratch$1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("20Paths"));
        assert!(!is_identifier("class"));
        assert!(!is_identifier("Bad-Name"));
    }

    #[test]
    fn packages_are_dotted_identifiers() {
        assert!(is_package("trainwreck.util"));
        assert!(is_package("bot"));
        assert!(!is_package("trainwreck..util"));
        assert!(!is_package("trainwreck.new"));
    }

    #[test]
    fn every_direction_has_a_constant() {
        for direction in Direction::ALL {
            assert!(!direction_constant(direction).is_empty());
        }
        assert_eq!(direction_constant(Direction::SouthWest), "SOUTHWEST");
    }
}
