use std::path::Path;

const MEMBERS: [&str; 3] = ["miyabi-core", "miyabi-web", "miyabi-tester"];

#[test]
fn member_manifests_share_readme_and_toolchain() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
    assert!(root.join("README.md").is_file(), "workspace README missing");

    for member in MEMBERS {
        let manifest = std::fs::read_to_string(root.join(member).join("Cargo.toml"))
            .unwrap_or_else(|err| panic!("read {member} manifest: {err}"));
        assert!(
            manifest.contains("readme = \"../README.md\""),
            "{member} does not point at the workspace README"
        );
        assert!(
            manifest.contains("rust-version.workspace = true"),
            "{member} does not inherit rust-version"
        );
    }
}
