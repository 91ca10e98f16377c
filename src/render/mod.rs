//! PowerShell link-creation script generation

use crate::error::Result;
use crate::mapping::PathMapping;
use crate::util::{PsEscape, to_windows};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// Comment line opening every link block
pub const LINK_MARKER: &str = "# [link] ";

const HEADER: &str = "\
# Generated by pathlink. Do not edit: change the mapping and run `pathlink render`.
#
# Creates one directory symbolic link per mapped output directory.
# WARNING: an existing directory at a source path is DELETED before its link
# is created. Any data there that has not been synced elsewhere is lost.
";

const PRIVILEGE_CHECK: &str = "\
$identity = [Security.Principal.WindowsIdentity]::GetCurrent()
$principal = New-Object Security.Principal.WindowsPrincipal($identity)
if (-not $principal.IsInRole([Security.Principal.WindowsBuiltInRole]::Administrator)) {
    $message = '[ERROR] Administrator privileges are required to create symbolic links.'
    Write-Host $message -ForegroundColor Red
    Write-Host '        Re-run this script from an elevated PowerShell session.'
    exit 1
}
";

const FOOTER: &str = "\
Write-Host ''
Write-Host \"Links created: $ok, failed: $failed\"
exit 0
";

/// Render the link-creation script for `mapping`
///
/// `project_root` is the project directory on the host running the script;
/// without it the script uses its own directory.
pub fn render(mapping: &PathMapping, project_root: Option<&str>) -> String {
    let mut script = String::new();
    script.push_str(HEADER);
    script.push('\n');
    script.push_str(PRIVILEGE_CHECK);
    script.push('\n');

    match project_root {
        Some(root) => {
            let _ = writeln!(script, "$ProjectRoot = {}", PsEscape::single_quoted(root));
        }
        None => script.push_str("$ProjectRoot = $PSScriptRoot\n"),
    }
    script.push_str("$ok = 0\n$failed = 0\n");

    if mapping.is_empty() {
        script.push_str("\nWrite-Host 'No mappings configured, nothing to link.'\n");
    }

    for (logical, target) in mapping.iter() {
        script.push('\n');
        render_block(&mut script, logical, target);
    }

    script.push('\n');
    script.push_str(FOOTER);
    script
}

fn render_block(script: &mut String, logical: &str, target: &str) {
    let name = PsEscape::single_quoted(logical);
    let relative = PsEscape::single_quoted(&to_windows(logical));
    let target = PsEscape::single_quoted(target);

    let _ = writeln!(script, "{LINK_MARKER}{}", PsEscape::comment(logical));
    let _ = write!(
        script,
        "\
$name = {name}
try {{
    $source = Join-Path $ProjectRoot {relative}
    $target = {target}
    if (-not (Test-Path -LiteralPath $target)) {{
        New-Item -ItemType Directory -Path $target -Force -ErrorAction Stop | Out-Null
    }}
    $parent = Split-Path -Parent $source
    if (-not (Test-Path -LiteralPath $parent)) {{
        New-Item -ItemType Directory -Path $parent -Force -ErrorAction Stop | Out-Null
    }}
    $existing = Get-Item -LiteralPath $source -Force -ErrorAction SilentlyContinue
    if ($existing) {{
        Write-Warning \"Removing existing $source\"
        if ($existing.LinkType) {{
            $existing.Delete()
        }} else {{
            Remove-Item -LiteralPath $source -Recurse -Force -ErrorAction Stop
        }}
    }}
    New-Item -ItemType SymbolicLink -Path $source -Target $target -ErrorAction Stop | Out-Null
    Write-Host \"[OK]   $source -> $target\" -ForegroundColor Green
    $ok++
}} catch {{
    Write-Host \"[FAIL] ${{name}}: $($_.Exception.Message)\" -ForegroundColor Red
    $failed++
}}
"
    );
}

/// Number of link blocks in a rendered script
pub fn count_link_blocks(script: &str) -> usize {
    script.lines().filter(|line| line.starts_with(LINK_MARKER)).count()
}

/// Write a rendered script with CRLF line endings and a UTF-8 BOM
///
/// Windows PowerShell 5 reads BOM-less files as ANSI, which mangles
/// non-ASCII target paths.
pub fn write_script(script: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut bytes = Vec::with_capacity(script.len() + script.lines().count() + 3);
    bytes.extend_from_slice(b"\xEF\xBB\xBF");
    for line in script.lines() {
        bytes.extend_from_slice(line.as_bytes());
        bytes.extend_from_slice(b"\r\n");
    }
    std::fs::write(path, bytes)?;

    info!(
        "Wrote link script with {} entries to {:?}",
        count_link_blocks(script),
        path
    );
    Ok(())
}
