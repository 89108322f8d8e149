use std::{fs, path::PathBuf};

use tempfile::tempdir;

use ferry::FerryError;
use ferry_cli::{Args, parse_diagram, run};

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn args_for(input: PathBuf, directory: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        directory: Some(directory.to_string_lossy().to_string()),
        name: Some("Login".to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    }
}

#[test]
fn e2e_export_sample_diagram() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().join("out");

    let args = args_for(data_file("login.toml"), out_dir.clone());
    run(&args).expect("sample diagram should export");

    let svg = fs::read_to_string(out_dir.join("Login.svg")).unwrap();
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("svc:Service"));
    assert!(svg.contains("login(name:string):bool"));
    assert!(svg.contains("return()"));
}

#[test]
fn e2e_second_run_does_not_overwrite() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(data_file("login.toml"), temp_dir.path().to_path_buf());

    run(&args).unwrap();
    run(&args).unwrap();
    assert!(temp_dir.path().join("Login1.svg").exists());

    let args = Args {
        overwrite: true,
        ..args
    };
    run(&args).unwrap();
    assert!(!temp_dir.path().join("Login2.svg").exists());
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    let out_dir = temp_dir.path().join("from_config");
    fs::write(
        &config_path,
        format!(
            "[output]\ndirectory = {:?}\nname = \"Configured\"\n\n[style]\nline_color = \"#ff0000\"\n",
            out_dir.to_string_lossy()
        ),
    )
    .unwrap();

    let args = Args {
        input: data_file("login.toml").to_string_lossy().to_string(),
        config: Some(config_path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    };
    run(&args).unwrap();

    let svg = fs::read_to_string(out_dir.join("Configured.svg")).unwrap();
    assert!(svg.contains("marker"), "{svg}");
}

#[test]
fn e2e_missing_input_is_io_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(
        temp_dir.path().join("missing.toml"),
        temp_dir.path().to_path_buf(),
    );

    let err = run(&args).unwrap_err();
    assert!(matches!(err, FerryError::Io(_)), "{err:?}");
}

#[test]
fn e2e_dangling_link_is_parse_error() {
    let source = r#"
[[symbols]]
id = "user"
kind = "actor"

[[symbols]]
id = "life"
kind = "lifeline"
source = "ghost"
"#;

    let err = parse_diagram(source).unwrap_err();
    match err {
        FerryError::Parse { message, src, .. } => {
            assert!(message.contains("ghost"), "{message}");
            assert_eq!(src, source);
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn e2e_unknown_kind_is_parse_error_with_span() {
    let source = "[[symbols]]\nid = \"x\"\nkind = \"gizmo\"\n";

    let err = parse_diagram(source).unwrap_err();
    assert!(matches!(err, FerryError::Parse { span: Some(_), .. }), "{err:?}");
}

#[test]
fn e2e_transcript_flag_still_exports() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = Args {
        transcript: true,
        ..args_for(data_file("login.toml"), temp_dir.path().to_path_buf())
    };

    run(&args).expect("export with transcript should succeed");
    assert!(temp_dir.path().join("Login.svg").exists());
}
