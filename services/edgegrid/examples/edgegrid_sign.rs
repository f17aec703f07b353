use anyhow::Result;
use gridsign_core::{Context, SignableRequest, Signer};
use gridsign_edgegrid::{DefaultCredentialProvider, RequestSigner};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Create context: OS environment, system clock, OS randomness.
    let ctx = Context::new();

    // Credentials resolve from the environment:
    // AKAMAI_CLIENT_TOKEN, AKAMAI_CLIENT_SECRET, AKAMAI_ACCESS_TOKEN, AKAMAI_HOST
    let loader = DefaultCredentialProvider::new();

    // Create the signer
    let signer = Signer::new(ctx, loader, RequestSigner::new());

    // Example 1: sign a GET request
    println!("Example 1: List Property Manager contracts");
    let req = SignableRequest::new("GET", "/papi/v1/contracts")?;
    let authed = signer.sign(req).await?;
    println!("{} {}", authed.method, authed.uri);
    for (name, value) in authed.headers.iter() {
        println!("  {name}: {value:?}");
    }

    // Example 2: sign a POST request with a JSON body and query parameters
    println!("Example 2: Launch a diagnostic URL request");
    let req = SignableRequest::new("POST", "/diagnostic-tools/v2/end-users/diagnostic-url")?
        .with_query("async", "true")
        .with_body(serde_json::json!({ "url": "https://www.example.com" }));
    let authed = signer.sign(req).await?;
    println!("{} {}", authed.method, authed.uri);

    // Hand `authed` to your HTTP client of choice; the transport supplies
    // Host and Content-Length itself.
    Ok(())
}
