//! Project GUID handling.
//! Finds the GUIDs that a solution assigns to its projects and pairs each of
//! them with a freshly generated one.

use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use std::sync::LazyLock;

/// Distinct identifiers in first-seen order.
pub type IdentifierSet = IndexSet<String>;

/// Original identifier to its replacement.
pub type IdentifierMap = IndexMap<String, String>;

const GUID: &str = r"[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}";

// Project("{TYPE-GUID}") = "Name", "Name\Name.csproj", "{PROJECT-GUID}"
static SOLUTION_PROJECT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"^Project\(.*"\{{(?P<guid>{GUID})\}}"$"#)).expect("valid regex")
});

// <ProjectGuid>{PROJECT-GUID}</ProjectGuid>
static PROJECT_GUID_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^<ProjectGuid>\{{(?P<guid>{GUID})\}}</ProjectGuid>$"))
        .expect("valid regex")
});

/// Returns the project GUID declared on a single descriptor line, without braces.
///
/// Surrounding whitespace is ignored. The project type GUID of a solution line is
/// never returned, only the trailing project GUID.
///
/// # Examples
/// ```
/// use ouroboros::guid::match_identifier_line;
///
/// let line = r#"Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "Test", "Test\Test.csproj", "{8EA60CA5-7D3D-4813-ACB1-069618285452}""#;
/// assert_eq!(match_identifier_line(line), Some("8EA60CA5-7D3D-4813-ACB1-069618285452"));
/// assert_eq!(match_identifier_line("EndProject"), None);
/// ```
pub fn match_identifier_line(line: &str) -> Option<&str> {
    let line = line.trim();
    SOLUTION_PROJECT_LINE
        .captures(line)
        .or_else(|| PROJECT_GUID_LINE.captures(line))
        .and_then(|caps| caps.name("guid"))
        .map(|m| m.as_str())
}

/// Collects the distinct project GUIDs of a descriptor, in first-seen order.
pub fn extract_identifiers(contents: &str) -> IdentifierSet {
    contents.lines().filter_map(match_identifier_line).map(str::to_string).collect()
}

/// Source of fresh identifiers.
pub trait IdentifierSource {
    /// Returns a new identifier in canonical dashed form.
    fn fresh(&mut self) -> String;
}

/// Random version 4 UUIDs, upper-cased like the GUIDs Visual Studio writes.
#[derive(Debug, Default)]
pub struct RandomIdentifierSource;

impl IdentifierSource for RandomIdentifierSource {
    fn fresh(&mut self) -> String {
        uuid::Uuid::new_v4().hyphenated().to_string().to_uppercase()
    }
}

/// Pairs every identifier with a fresh one.
///
/// A drawn value that equals one of the originals or an earlier replacement is
/// discarded and drawn again, so the resulting map is one-to-one and no
/// replacement can be confused with an original.
pub fn remap_identifiers(
    identifiers: &IdentifierSet,
    source: &mut dyn IdentifierSource,
) -> IdentifierMap {
    let mut taken: IndexSet<String> = identifiers.iter().map(|id| id.to_uppercase()).collect();
    let mut mapping = IdentifierMap::with_capacity(identifiers.len());

    for identifier in identifiers {
        let replacement = loop {
            let candidate = source.fresh();
            if taken.insert(candidate.to_uppercase()) {
                break candidate;
            }
            log::debug!("Discarding colliding identifier {}", candidate);
        };
        mapping.insert(identifier.clone(), replacement);
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLUTION: &str = r#"
Microsoft Visual Studio Solution File, Format Version 12.00
Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "Test", "Test\Test.csproj", "{8EA60CA5-7D3D-4813-ACB1-069618285452}"
EndProject
Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "Test.Tests", "Test.Tests\Test.Tests.csproj", "{E20EF42E-DBB7-42AF-B870-6B1C9D27FC48}"
EndProject
Global
	GlobalSection(ProjectConfigurationPlatforms) = postSolution
		{8EA60CA5-7D3D-4813-ACB1-069618285452}.Debug|Any CPU.ActiveCfg = Debug|Any CPU
	EndGlobalSection
EndGlobal
"#;

    /// Hands out a fixed list of identifiers, in order.
    struct Scripted(Vec<&'static str>);

    impl IdentifierSource for Scripted {
        fn fresh(&mut self) -> String {
            self.0.remove(0).to_string()
        }
    }

    #[test]
    fn test_extract_from_solution() {
        let ids = extract_identifiers(SOLUTION);
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        assert_eq!(
            ids,
            vec!["8EA60CA5-7D3D-4813-ACB1-069618285452", "E20EF42E-DBB7-42AF-B870-6B1C9D27FC48"]
        );
    }

    #[test]
    fn test_extract_from_project_file() {
        let contents = r#"
    <Platform Condition=" '$(Platform)' == '' ">AnyCPU</Platform>
    <ProjectGuid>{E20EF42E-DBB7-42AF-B870-6B1C9D27FC48}</ProjectGuid>
    <OutputType>Library</OutputType>
"#;
        let ids = extract_identifiers(contents);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("E20EF42E-DBB7-42AF-B870-6B1C9D27FC48"));
    }

    #[test]
    fn test_extract_collapses_duplicates() {
        let line = r#"Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "A", "A\A.csproj", "{AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA}""#;
        let contents = format!("{line}\r\nEndProject\r\n  {line}  \r\nEndProject\r\n");
        assert_eq!(extract_identifiers(&contents).len(), 1);
    }

    #[test]
    fn test_match_rejects_malformed_identifiers() {
        assert_eq!(match_identifier_line("<ProjectGuid>{not-a-guid}</ProjectGuid>"), None);
        assert_eq!(
            match_identifier_line(
                r#"Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "A", "A\A.csproj", "{AAAA-AAAA}""#
            ),
            None
        );
        assert_eq!(
            match_identifier_line("{8EA60CA5-7D3D-4813-ACB1-069618285452}.Debug|Any CPU.Build.0 = Debug|Any CPU"),
            None
        );
    }

    #[test]
    fn test_random_source_format() {
        let id = RandomIdentifierSource.fresh();
        let line = format!("<ProjectGuid>{{{id}}}</ProjectGuid>");
        assert_eq!(match_identifier_line(&line), Some(id.as_str()));
        assert_eq!(id, id.to_uppercase());
    }

    #[test]
    fn test_remap_one_entry_per_identifier() {
        let ids = extract_identifiers(SOLUTION);
        let map = remap_identifiers(&ids, &mut RandomIdentifierSource);

        assert_eq!(map.len(), 2);
        let values: IndexSet<&String> = map.values().collect();
        assert_eq!(values.len(), 2);
        for value in map.values() {
            assert!(!ids.contains(value));
        }
    }

    #[test]
    fn test_remap_redraws_on_collision() {
        let ids: IdentifierSet = ["AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA", "BBBBBBBB-BBBB-BBBB-BBBB-BBBBBBBBBBBB"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut source = Scripted(vec![
            "BBBBBBBB-BBBB-BBBB-BBBB-BBBBBBBBBBBB",
            "11111111-1111-1111-1111-111111111111",
            "11111111-1111-1111-1111-111111111111",
            "22222222-2222-2222-2222-222222222222",
        ]);

        let map = remap_identifiers(&ids, &mut source);
        assert_eq!(map["AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA"], "11111111-1111-1111-1111-111111111111");
        assert_eq!(map["BBBBBBBB-BBBB-BBBB-BBBB-BBBBBBBBBBBB"], "22222222-2222-2222-2222-222222222222");
    }

    #[test]
    fn test_remap_empty_set() {
        assert!(remap_identifiers(&IdentifierSet::new(), &mut RandomIdentifierSource).is_empty());
    }
}
