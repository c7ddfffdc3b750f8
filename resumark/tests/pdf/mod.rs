#[cfg(all(unix, feature = "native-export"))]
mod unix {
    use crate::common::sample_cv;
    use resumark::formats::PdfFormat;
    use resumark::{Format, FormatError, SerializedDocument};
    use std::collections::HashMap;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    /// Fake browser that records its arguments and the page it was asked to print.
    fn write_stub_chrome(dir: &std::path::Path) -> std::path::PathBuf {
        let script_path = dir.join("fake-chrome.sh");
        let log = dir.join("args.log");
        let script = format!(
            r#"#!/bin/sh
OUTPUT=""
for arg in "$@"; do
  echo "$arg" >> "{log}"
  case $arg in
    --print-to-pdf=*)
      OUTPUT="${{arg#*=}}"
      ;;
  esac
done
printf '%%PDF-1.7\n%%%%EOF\n' > "$OUTPUT"
"#,
            log = log.display()
        );
        fs::write(&script_path, script).unwrap();
        let mut perms = fs::metadata(&script_path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).unwrap();
        script_path
    }

    #[test]
    fn renders_through_the_browser() {
        let dir = tempdir().unwrap();
        let chrome = write_stub_chrome(dir.path());
        let format = PdfFormat::new().with_chrome_bin(&chrome);

        let output = format
            .serialize_with_options(&sample_cv(), &HashMap::new())
            .unwrap();
        let SerializedDocument::Binary(bytes) = output else {
            panic!("expected binary output");
        };
        assert!(bytes.starts_with(b"%PDF"));

        let args = fs::read_to_string(dir.path().join("args.log")).unwrap();
        assert!(args.contains("--headless"));
        assert!(args.contains("--print-to-pdf-no-header"));
        assert!(args.contains("--window-size=793,1122"));
        assert!(args.contains("file://"));
    }

    #[test]
    fn chrome_option_wins_over_configured_binary() {
        let dir = tempdir().unwrap();
        let chrome = write_stub_chrome(dir.path());
        let format = PdfFormat::new().with_chrome_bin("/nonexistent/chrome");

        let mut options = HashMap::new();
        options.insert("chrome-bin".to_string(), chrome.display().to_string());
        options.insert("page-size".to_string(), "letter".to_string());
        let bytes = format
            .serialize_with_options(&sample_cv(), &options)
            .unwrap()
            .into_bytes();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn failing_browser_is_an_error() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("broken-chrome.sh");
        fs::write(&script, "#!/bin/sh\nexit 3\n").unwrap();
        let mut perms = fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script, perms).unwrap();

        let err = PdfFormat::new()
            .with_chrome_bin(&script)
            .serialize_with_options(&sample_cv(), &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, FormatError::SerializationError(_)));
    }
}
