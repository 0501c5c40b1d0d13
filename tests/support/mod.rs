//! Test support utilities for installer behavioural tests.
//!
//! Provides archive builders matching the release layout, a checksum
//! registry helper, and a minimal one-shot HTTP server so the production
//! downloader can be exercised without touching the network.

use insthugo::artefact::registry::ChecksumRegistry;
use insthugo::artefact::sha256_digest::Sha256Digest;
use sha2::{Digest, Sha256};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};

/// Build a gzip archive with an embedded original filename.
pub fn gzip_archive(embedded_name: &str, payload: &[u8]) -> Vec<u8> {
    let cursor = std::io::Cursor::new(Vec::new());
    let mut encoder = flate2::GzBuilder::new()
        .filename(embedded_name)
        .write(cursor, flate2::Compression::default());
    encoder.write_all(payload).expect("write payload");
    encoder.finish().expect("finish gzip").into_inner()
}

/// Build a zip archive of `(name, payload)` entries with mode 0755.
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let cursor = std::io::Cursor::new(Vec::new());
    let mut writer = zip::ZipWriter::new(cursor);
    let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
    for (name, payload) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(payload).expect("write entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// A registry holding the digest of `archive` under `filename`.
pub fn registry_for(filename: &str, archive: &[u8]) -> ChecksumRegistry {
    let hex = format!("{:x}", Sha256::digest(archive));
    let digest = Sha256Digest::try_from(hex).expect("sha2 digest is valid");
    ChecksumRegistry::from_entries([(filename.to_owned(), digest)])
}

/// Serve `body` once over HTTP on an ephemeral local port.
///
/// The listener accepts exactly one connection, answers with a 200
/// response carrying `body`, then shuts down. Returns the base URL to
/// point a downloader at.
pub fn serve_archive_once(body: Vec<u8>) -> String {
    serve_once(move |stream| {
        let header = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(header.as_bytes());
        let _ = stream.write_all(&body);
    })
}

/// Serve a single bodyless HTTP error response with the given status.
pub fn serve_status_once(status: u16, reason: &'static str) -> String {
    serve_once(move |stream| {
        let header = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        );
        let _ = stream.write_all(header.as_bytes());
    })
}

/// A base URL on a port that nothing is listening on.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let port = listener.local_addr().expect("read local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}

fn serve_once(respond: impl FnOnce(&mut TcpStream) + Send + 'static) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let port = listener.local_addr().expect("read local address").port();
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            drain_request_head(&stream);
            respond(&mut stream);
            let _ = stream.flush();
        }
    });
    format!("http://127.0.0.1:{port}/")
}

fn drain_request_head(stream: &TcpStream) {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) if line == "\r\n" => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }
}
