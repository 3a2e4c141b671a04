use std::path::Path;

use super::overrides::BootFlags;

/// Build the emulator argument string.
///
/// Layout: enabled boot flags (`--fullboot --nohacks --usecd --nogui`), then
/// `--cfgpath="<dir>"` when a per-game config directory is given, then the
/// quoted image path. Runs of backslashes left over from path concatenation
/// collapse to one.
///
/// Only the two paths are quoted. Paths containing `"` are not escaped.
pub fn compose_arguments(image: &Path, config_dir: Option<&Path>, flags: &BootFlags) -> String {
    let mut segments: Vec<String> = flags.enabled().map(|f| f.as_arg().to_string()).collect();

    if let Some(dir) = config_dir {
        segments.push(format!("--cfgpath={}", quote(dir)));
    }
    segments.push(quote(image));

    collapse_backslashes(&segments.join(" "))
}

fn quote(path: &Path) -> String {
    format!("\"{}\"", path.to_string_lossy())
}

fn collapse_backslashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_backslash = false;
    for c in s.chars() {
        if c == '\\' {
            if prev_backslash {
                continue;
            }
            prev_backslash = true;
        } else {
            prev_backslash = false;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_only() {
        let args = compose_arguments(Path::new("C:\\Foo.iso"), None, &BootFlags::default());
        assert_eq!(args, "\"C:\\Foo.iso\"");
        assert!(!args.contains("--cfgpath"));
    }

    #[test]
    fn test_fullboot_precedes_nohacks() {
        let flags = BootFlags {
            full_boot: true,
            no_hacks: true,
            use_cd: false,
            no_gui: false,
        };
        let args = compose_arguments(Path::new("C:\\Games\\Foo.iso"), None, &flags);

        let fullboot = args.find("--fullboot").unwrap();
        let nohacks = args.find("--nohacks").unwrap();
        assert!(fullboot < nohacks);
        assert!(!args.contains("--usecd"));
        assert!(!args.contains("--nogui"));
        assert_eq!(args, "--fullboot --nohacks \"C:\\Games\\Foo.iso\"");
    }

    #[test]
    fn test_all_flags_with_cfgpath() {
        let flags = BootFlags {
            full_boot: true,
            no_hacks: true,
            use_cd: true,
            no_gui: true,
        };
        let args = compose_arguments(
            Path::new("C:\\Games\\Bar.iso"),
            Some(Path::new("C:\\Bonus\\Configs\\Bar")),
            &flags,
        );
        assert_eq!(
            args,
            "--fullboot --nohacks --usecd --nogui --cfgpath=\"C:\\Bonus\\Configs\\Bar\" \"C:\\Games\\Bar.iso\""
        );
    }

    #[test]
    fn test_doubled_backslashes_are_collapsed() {
        let args = compose_arguments(
            Path::new("C:\\\\Games\\\\\\Foo.iso"),
            Some(Path::new("C:\\Bonus\\\\Configs\\Foo")),
            &BootFlags::default(),
        );
        assert_eq!(
            args,
            "--cfgpath=\"C:\\Bonus\\Configs\\Foo\" \"C:\\Games\\Foo.iso\""
        );
    }
}
