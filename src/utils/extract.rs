use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};

/// Extract a package archive into the target prefix. Release archives wrap
/// everything in a single `node-v<version>-<platform>-<arch>` directory;
/// that wrapper is stripped so `bin/node` lands at `<prefix>/bin/node`.
pub fn extract_archive(config: &Config, archive_path: &Path, prefix: &Path) -> Result<()> {
    let name = archive_path.to_string_lossy();

    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        extract_tar_gz(config, archive_path, prefix)
    } else if name.ends_with(".zip") {
        extract_zip(config, archive_path, prefix)
    } else {
        let filename = archive_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.into_owned());
        Err(Error::UnsupportedFormat(filename))
    }
}

fn strip_top_dir(path: &Path) -> Option<PathBuf> {
    let stripped: PathBuf = path.components().skip(1).collect();
    if stripped.as_os_str().is_empty() {
        // the wrapper directory itself
        None
    } else {
        Some(stripped)
    }
}

fn extract_tar_gz(config: &Config, archive_path: &Path, prefix: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let decompressed = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(decompressed);

    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        let Some(out_path) = strip_top_dir(&path).map(|rel| prefix.join(rel)) else {
            continue;
        };

        config.debug(&format!("extract {} -> {}", path.display(), out_path.display()));
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        entry.unpack(&out_path)?;
    }

    Ok(())
}

fn extract_zip(config: &Config, archive_path: &Path, prefix: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let Some(enclosed) = file.enclosed_name().map(|p| p.to_path_buf()) else {
            continue;
        };
        let Some(out_path) = strip_top_dir(&enclosed).map(|rel| prefix.join(rel)) else {
            continue;
        };

        config.debug(&format!("extract {} -> {}", file.name(), out_path.display()));
        if file.name().ends_with('/') {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out_file = fs::File::create(&out_path)?;
            io::copy(&mut file, &mut out_file)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use std::io::Write;

    fn build_tar_gz(path: &Path) {
        let file = fs::File::create(path).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let mut dir_header = tar::Header::new_gnu();
        dir_header.set_entry_type(tar::EntryType::dir());
        dir_header.set_size(0);
        dir_header.set_mode(0o755);
        dir_header.set_cksum();
        builder
            .append_data(&mut dir_header, "node-v1.0.0-linux-x64/", io::empty())
            .unwrap();

        let payload = b"#!/bin/sh\n";
        let mut header = tar::Header::new_gnu();
        header.set_size(payload.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder
            .append_data(&mut header, "node-v1.0.0-linux-x64/bin/node", &payload[..])
            .unwrap();

        builder.into_inner().unwrap().finish().unwrap();
    }

    fn build_zip(path: &Path) {
        let file = fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::FileOptions::default();

        zip.add_directory("node-v1.0.0-win-x64/", options).unwrap();
        zip.start_file("node-v1.0.0-win-x64/node.exe", options).unwrap();
        zip.write_all(b"binary").unwrap();
        zip.start_file("node-v1.0.0-win-x64/node_modules/npm/README.md", options)
            .unwrap();
        zip.write_all(b"npm").unwrap();

        zip.finish().unwrap();
    }

    #[test]
    fn tar_gz_extraction_strips_the_top_level_directory() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("node-v1.0.0-linux-x64.tar.gz");
        build_tar_gz(&archive);
        let prefix = dir.path().join("prefix");

        extract_archive(&test_config(), &archive, &prefix).unwrap();

        assert!(prefix.join("bin/node").is_file());
        assert!(!prefix.join("node-v1.0.0-linux-x64").exists());
    }

    #[test]
    fn zip_extraction_strips_the_top_level_directory() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("node-v1.0.0-win-x64.zip");
        build_zip(&archive);
        let prefix = dir.path().join("prefix");

        extract_archive(&test_config(), &archive, &prefix).unwrap();

        assert_eq!(b"binary".to_vec(), fs::read(prefix.join("node.exe")).unwrap());
        assert_eq!(
            b"npm".to_vec(),
            fs::read(prefix.join("node_modules/npm/README.md")).unwrap()
        );
        assert!(!prefix.join("node-v1.0.0-win-x64").exists());
    }

    #[test]
    fn other_formats_are_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("node-v1.0.0-win-x64.msi");
        fs::write(&archive, b"not an archive").unwrap();

        let err = extract_archive(&test_config(), &archive, dir.path()).unwrap_err();
        match err {
            Error::UnsupportedFormat(name) => assert_eq!("node-v1.0.0-win-x64.msi", name),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }
}
