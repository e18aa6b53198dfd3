use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const ENV_PREFIX: &str = "DOCINV_";
const TEST_MODULE_MARKER: &str = "#[cfg(test)]\nmod ";

fn collect_rs_files(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_rs_files(&path, out)?;
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
            out.push(path);
        }
    }
    Ok(())
}

fn is_env_key(candidate: &str) -> bool {
    candidate
        .strip_prefix(ENV_PREFIX)
        .is_some_and(|rest| {
            !rest.is_empty()
                && rest
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
        })
}

/// Keys are string literals that consist of nothing but a `DOCINV_*` name,
/// e.g. `env::var("DOCINV_TIMEZONE")`. Prefixes inside longer literals such
/// as the warn line format are not variables. Test modules are skipped so
/// fixtures never widen the allowlist.
fn collect_env_keys(source: &str, out: &mut BTreeSet<String>) {
    let live = source
        .find(TEST_MODULE_MARKER)
        .map_or(source, |end| &source[..end]);
    let mut literal: Option<String> = None;
    let mut chars = live.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => match literal.take() {
                Some(buf) if is_env_key(&buf) => {
                    out.insert(buf);
                }
                Some(_) => {}
                None => literal = Some(String::new()),
            },
            // Escapes never occur in a key; keep a marker so the literal fails the check.
            '\\' if literal.is_some() => {
                chars.next();
                if let Some(buf) = literal.as_mut() {
                    buf.push('\\');
                }
            }
            other => {
                if let Some(buf) = literal.as_mut() {
                    buf.push(other);
                }
            }
        }
    }
}

fn write_generated_allowlist() -> std::io::Result<()> {
    let mut rs_files = Vec::new();
    collect_rs_files(Path::new("src"), &mut rs_files)?;
    rs_files.sort();

    let mut keys = BTreeSet::new();
    for file in rs_files {
        if let Ok(content) = fs::read_to_string(&file) {
            collect_env_keys(&content, &mut keys);
        }
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let generated = Path::new(&out_dir).join("docinv_env_allowlist.rs");
    let mut f = fs::File::create(generated)?;
    writeln!(f, "pub const GENERATED_ENV_ALLOWLIST: &[&str] = &[")?;
    for key in keys {
        writeln!(f, "    \"{key}\",")?;
    }
    writeln!(f, "];")?;
    Ok(())
}

fn main() {
    write_generated_allowlist().expect("failed to generate DOCINV env allowlist");

    let build_id = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|now| format!("{:x}-{:x}", now.as_secs(), now.subsec_nanos()))
        .unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=BUILD_UUID={build_id}");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src");
}
