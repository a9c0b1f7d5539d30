//! Shared fixtures for pbxproj-localize integration tests.
//!
//! These tests create a throwaway Xcode project layout and run the binary
//! against it from the project's parent directory.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Relative location of the manifest the binary rewrites by default.
pub const PROJECT_FILE: &str = "AsideMusic.xcodeproj/project.pbxproj";

/// Abridged pbxproj with the four migrated packages and one unrelated package.
pub const REMOTE_PROJECT: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	objects = {

/* Begin XCRemoteSwiftPackageReference section */
		B20000000000000000000001 /* XCRemoteSwiftPackageReference "LiquidGlass" */ = {
			isa = XCRemoteSwiftPackageReference;
			repositoryURL = "https://github.com/someone/LiquidGlass.git";
			requirement = {
				branch = main;
				kind = branch;
			};
		};
		B20000000000000000000002 /* XCRemoteSwiftPackageReference "NeteaseCloudMusicAPI-Swift" */ = {
			isa = XCRemoteSwiftPackageReference;
			repositoryURL = "https://github.com/someone/NeteaseCloudMusicAPI-Swift.git";
			requirement = {
				kind = upToNextMajorVersion;
				minimumVersion = 1.0.0;
			};
		};
		B20000000000000000000003 /* XCRemoteSwiftPackageReference "MusicKit" */ = {
			isa = XCRemoteSwiftPackageReference;
			repositoryURL = "https://github.com/someone/MusicKit.git";
			requirement = {
				branch = main;
				kind = branch;
			};
		};
		B20000000000000000000004 /* XCRemoteSwiftPackageReference "FFmpegSwiftSDK" */ = {
			isa = XCRemoteSwiftPackageReference;
			repositoryURL = "https://github.com/someone/FFmpegSwiftSDK.git";
			requirement = {
				kind = exactVersion;
				version = 0.3.1;
			};
		};
		B20000000000000000000005 /* XCRemoteSwiftPackageReference "swift-collections" */ = {
			isa = XCRemoteSwiftPackageReference;
			repositoryURL = "https://github.com/apple/swift-collections.git";
			requirement = {
				kind = upToNextMajorVersion;
				minimumVersion = 1.1.0;
			};
		};
/* End XCRemoteSwiftPackageReference section */
	};
	rootObject = B20000000000000000000000 /* Project object */;
}
"#;

/// The mapped (identity, relativePath) pairs of the built-in table.
pub const PACKAGES: &[(&str, &str)] = &[
    ("LiquidGlass", "LiquidGlass-main"),
    ("NeteaseCloudMusicAPI-Swift", "NeteaseCloudMusicAPI-Swift"),
    ("MusicKit", "QQMusicKit"),
    ("FFmpegSwiftSDK", "ffmpeg-swift"),
];

/// Creates a temp directory holding `AsideMusic.xcodeproj/project.pbxproj`.
#[allow(unused)]
pub fn create_test_project(content: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join(PROJECT_FILE);
    fs::create_dir_all(manifest.parent().unwrap()).unwrap();
    fs::write(&manifest, content).unwrap();
    temp
}

#[allow(unused)]
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(PROJECT_FILE)
}

#[allow(unused)]
pub fn read_manifest(root: &Path) -> String {
    fs::read_to_string(manifest_path(root)).unwrap()
}

/// Runs the binary from `root` with `extra_args`.
pub fn run_localize(root: &Path, extra_args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("pbxproj-localize");
    cmd.args(extra_args).current_dir(root);

    cmd.assert()
}
