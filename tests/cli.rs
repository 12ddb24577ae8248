use std::path::PathBuf;
use std::process::Command;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("symhuff-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn symhuff() -> Command {
    Command::new(env!("CARGO_BIN_EXE_symhuff"))
}

#[test]
fn compress_then_decompress_restores_file() -> anyhow::Result<()> {
    let dir = scratch_dir("roundtrip");
    let original = dir.join("poem.txt");
    let packed = dir.join("poem.txt.symh");
    let restored = dir.join("poem.out");
    let text = "the rain in spain stays mainly in the plain\n".repeat(50);
    std::fs::write(&original, &text)?;

    let status = symhuff().arg("compress").arg(&original).status()?;
    assert!(status.success());
    assert!(std::fs::metadata(&packed)?.len() < text.len() as u64);

    let status = symhuff()
        .arg("decompress")
        .arg(&packed)
        .arg(&restored)
        .status()?;
    assert!(status.success());
    assert_eq!(std::fs::read_to_string(&restored)?, text);

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn inspect_reports_json() -> anyhow::Result<()> {
    let dir = scratch_dir("inspect");
    let input = dir.join("word.txt");
    std::fs::write(&input, "abracadabra")?;

    let output = symhuff().arg("--json").arg("inspect").arg(&input).output()?;
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["original_size"], 11);
    assert_eq!(report["distinct_symbols"], 5);
    assert_eq!(report["payload_bits"], 23);

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn order_prints_steps_and_rejects_cycles() -> anyhow::Result<()> {
    let dir = scratch_dir("order");
    let manifest = dir.join("shelf.deps");
    std::fs::write(&manifest, "B: A\nC: B\nD: C\n")?;

    let output = symhuff()
        .args(["--json", "order", "--steps"])
        .arg(&manifest)
        .output()?;
    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        body["order"],
        serde_json::json!(["1. Assemble A", "2. Assemble B", "3. Assemble C", "4. Assemble D"])
    );

    std::fs::write(&manifest, "A: B\nB: A\n")?;
    let status = symhuff().arg("order").arg(&manifest).status()?;
    assert!(!status.success());

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn corrupted_container_fails() -> anyhow::Result<()> {
    let dir = scratch_dir("corrupt");
    let packed = dir.join("bad.symh");
    std::fs::write(&packed, b"NOPE-not-a-container")?;

    let output = symhuff()
        .arg("--json")
        .arg("decompress")
        .arg(&packed)
        .output()?;
    assert!(!output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert!(body["error"].as_str().unwrap_or("").contains("invalid container magic"));

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
