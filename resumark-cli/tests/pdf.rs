#[cfg(unix)]
mod unix {
    use assert_cmd::cargo::cargo_bin_cmd;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    const CV: &str = "# Jane Doe\n\n## Skills\n\n- Rust\n";

    fn write_stub_chrome() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let script_path = dir.path().join("fake-chrome.sh");
        let script = r#"#!/bin/sh
OUTPUT=""
for arg in "$@"; do
  case $arg in
    --print-to-pdf=*)
      OUTPUT="${arg#*=}"
      ;;
  esac
done
printf '%%PDF-1.7\n%%%%EOF\n' > "$OUTPUT"
"#;
        fs::write(&script_path, script).unwrap();
        let mut perms = fs::metadata(&script_path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).unwrap();
        (dir, script_path)
    }

    #[test]
    fn cli_converts_to_pdf_with_stub() {
        let (_dir, chrome_stub) = write_stub_chrome();
        let work = tempdir().unwrap();
        let input = work.path().join("cv.md");
        fs::write(&input, CV).unwrap();
        let output_pdf = work.path().join("cv.pdf");

        let mut cmd = cargo_bin_cmd!("resumark");
        cmd.env("RESUMARK_CHROME_BIN", &chrome_stub)
            .arg(&input)
            .arg("--to")
            .arg("pdf")
            .arg("-o")
            .arg(&output_pdf)
            .arg("--extra-page-size")
            .arg("letter");
        cmd.assert().success();

        let pdf = fs::read(&output_pdf).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn chrome_binary_can_be_passed_as_extra() {
        let (_dir, chrome_stub) = write_stub_chrome();
        let work = tempdir().unwrap();
        let input = work.path().join("cv.md");
        fs::write(&input, CV).unwrap();
        let output_pdf = work.path().join("cv.pdf");

        let mut cmd = cargo_bin_cmd!("resumark");
        cmd.env_remove("RESUMARK_CHROME_BIN")
            .arg(&input)
            .arg("--to")
            .arg("pdf")
            .arg("-o")
            .arg(&output_pdf)
            .arg("--extra-chrome-bin")
            .arg(&chrome_stub);
        cmd.assert().success();

        assert!(fs::read(&output_pdf).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn export_writes_docx_and_pdf_by_default() {
        let (_dir, chrome_stub) = write_stub_chrome();
        let work = tempdir().unwrap();
        let input = work.path().join("jane.md");
        fs::write(&input, CV).unwrap();
        let out_dir = work.path().join("out");

        let mut cmd = cargo_bin_cmd!("resumark");
        cmd.env("RESUMARK_CHROME_BIN", &chrome_stub)
            .arg("export")
            .arg(&input)
            .arg("--out-dir")
            .arg(&out_dir);
        cmd.assert().success();

        assert!(fs::read(out_dir.join("jane.docx")).unwrap().starts_with(b"PK"));
        assert!(fs::read(out_dir.join("jane.pdf")).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn cli_pdf_requires_output_path() {
        let (_dir, chrome_stub) = write_stub_chrome();
        let work = tempdir().unwrap();
        let input = work.path().join("cv.md");
        fs::write(&input, CV).unwrap();

        let mut cmd = cargo_bin_cmd!("resumark");
        cmd.env("RESUMARK_CHROME_BIN", &chrome_stub)
            .arg(&input)
            .arg("--to")
            .arg("pdf");
        cmd.assert().failure();
    }
}
