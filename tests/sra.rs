use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use geo_soft_json::app::App;
use geo_soft_json::output::FormatPolicy;
use geo_soft_json::sra::{SraClient, SraClientOptions, SraHttpClient};

fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 4096];
        let _ = stream.read(&mut request).unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    (format!("http://{addr}/sra?term=GSM1"), handle)
}

#[test]
fn error_status_body_is_returned() {
    let (url, handle) = serve_once("503 Service Unavailable", "busy, try run=SRR9 later");
    let client = SraHttpClient::with_options(&SraClientOptions::default()).unwrap();
    let text = client.fetch_text(&url).unwrap();
    handle.join().unwrap();
    assert_eq!(text, "busy, try run=SRR9 later");
}

#[test]
fn not_found_page_does_not_abort_conversion() {
    let (url, handle) = serve_once("404 Not Found", "not found; see run=SRR5");
    let client = SraHttpClient::with_options(&SraClientOptions::default()).unwrap();
    let app = App::new(client, FormatPolicy::default());
    let input = format!(
        "^SAMPLE = GSM1\n!Sample_title = T1\n!Sample_organism_ch1 = Mouse\n\
         !Sample_source_name_ch1 = Liver\n!Sample_relation = SRA: {url}\n"
    );
    let mut out = Vec::new();
    let result = app.convert(input.as_bytes(), &mut out).unwrap();
    handle.join().unwrap();

    assert_eq!(result.written, 1);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{ \"samples\":[\n\t{\"id\": \"T1\", \"name\": \"Mouse_Liver_T1\", \"sra\": [\"SRR5\"]}\n]}\n"
    );
}
