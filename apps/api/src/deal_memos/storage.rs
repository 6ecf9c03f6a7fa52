use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{info, warn};
use uuid::Uuid;

/// Storage key for a memo document. Versions count up per application so
/// regeneration never overwrites an earlier memo.
pub fn memo_key(application_id: Uuid, version: i64) -> String {
    format!("deal-memos/{application_id}/{version}.html")
}

/// Uploads the memo document and returns its public URL. An upload failure
/// is downgraded to a `data:` URL embedding the document, so approval never
/// fails on storage.
pub async fn store_memo_document(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    endpoint: &str,
    key: &str,
    html: &str,
) -> String {
    match upload(s3, bucket, key, html).await {
        Ok(()) => {
            info!("Uploaded deal memo to s3://{bucket}/{key}");
            format!("{endpoint}/{bucket}/{key}")
        }
        Err(e) => {
            warn!("Deal memo upload failed, falling back to data URL: {e}");
            data_url(html)
        }
    }
}

async fn upload(s3: &aws_sdk_s3::Client, bucket: &str, key: &str, html: &str) -> Result<()> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(html.as_bytes().to_vec()))
        .content_type("text/html")
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;
    Ok(())
}

pub fn data_url(html: &str) -> String {
    format!("data:text/html;base64,{}", STANDARD.encode(html.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_key_is_versioned_per_application() {
        let id = Uuid::nil();
        assert_eq!(
            memo_key(id, 1),
            "deal-memos/00000000-0000-0000-0000-000000000000/1.html"
        );
        assert_ne!(memo_key(id, 1), memo_key(id, 2));
    }

    #[test]
    fn test_data_url_round_trips() {
        let html = "<html><body>memo</body></html>";
        let url = data_url(html);
        assert!(url.starts_with("data:text/html;base64,"));
        let encoded = url.strip_prefix("data:text/html;base64,").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, html.as_bytes());
    }
}
