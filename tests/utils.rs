#![allow(dead_code)]

use ouroboros::cli::DotnetArgs;
use ouroboros::guid::IdentifierSource;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const PROJECT_TYPE_GUID: &str = "FAE04EC0-301F-11D3-BF4B-00C04F79EFBC";
pub const PROJECT_GUID: &str = "AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA";

/// Writes `content` to `root/rel`, creating parent directories.
pub fn write(root: &Path, rel: &str, content: impl AsRef<[u8]>) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn solution(name: &str, guid: &str) -> String {
    format!(
        "\u{feff}\r\nMicrosoft Visual Studio Solution File, Format Version 12.00\r\n\
Project(\"{{{PROJECT_TYPE_GUID}}}\") = \"{name}\", \"{name}\\{name}.csproj\", \"{{{guid}}}\"\r\n\
EndProject\r\n\
Project(\"{{{PROJECT_TYPE_GUID}}}\") = \"{name}\", \"{name}\\{name}.csproj\", \"{{{guid}}}\"\r\n\
EndProject\r\n\
Global\r\n\
\tGlobalSection(ProjectConfigurationPlatforms) = postSolution\r\n\
\t\t{{{guid}}}.Debug|Any CPU.ActiveCfg = Debug|Any CPU\r\n\
\tEndGlobalSection\r\n\
EndGlobal\r\n"
    )
}

pub fn project(name: &str, guid: &str) -> String {
    format!(
        "<Project ToolsVersion=\"15.0\">\r\n  <PropertyGroup>\r\n    <ProjectGuid>{{{guid}}}</ProjectGuid>\r\n    <RootNamespace>{name}</RootNamespace>\r\n    <AssemblyName>{name}</AssemblyName>\r\n  </PropertyGroup>\r\n</Project>\r\n"
    )
}

/// Builds a small solution named `name` under `parent/name`.
pub fn dotnet_template(parent: &Path, name: &str) -> PathBuf {
    let root = parent.join(name);
    write(&root, &format!("{name}.sln"), solution(name, PROJECT_GUID));
    write(&root, &format!("{name}/{name}.csproj"), project(name, PROJECT_GUID));
    write(
        &root,
        &format!("{name}/Program.cs"),
        format!("namespace {name}\n{{\n    class Program {{ }}\n}}\n"),
    );
    write(&root, &format!("{name}/Properties/launchSettings.json"), format!("{{\"profiles\": {{\"{name}\": {{}}}}}}"));
    root
}

pub fn args(template: &Path, output_dir: &Path, new_guids: bool) -> DotnetArgs {
    DotnetArgs {
        template: template.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        new_guids,
        tpl_name: None,
        profile: None,
        dry_run: false,
        verbose: false,
    }
}

/// Hands out `00000000-0000-0000-0000-000000000001`, `...0002` and so on.
#[derive(Default)]
pub struct SequentialIdentifierSource(u64);

impl IdentifierSource for SequentialIdentifierSource {
    fn fresh(&mut self) -> String {
        self.0 += 1;
        format!("00000000-0000-0000-0000-{:012X}", self.0)
    }
}

/// Relative paths of every entry below `root`, sorted, `/` separated.
pub fn tree(root: &Path) -> Vec<String> {
    let mut paths: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| {
            let e = e.unwrap();
            let rel = e.path().strip_prefix(root).unwrap();
            rel.components()
                .map(|c| c.as_os_str().to_str().unwrap().to_string())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    paths.sort();
    paths
}
