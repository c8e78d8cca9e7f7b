//! Object storage for compiled PDFs (MinIO locally, S3 in production).

use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

pub fn resume_pdf_key(resume_id: Uuid) -> String {
    format!("resumes/{resume_id}.pdf")
}

pub fn edited_pdf_key(resume_id: Uuid) -> String {
    format!("resumes/{resume_id}-edited.pdf")
}

pub async fn upload_pdf(s3: &S3Client, bucket: &str, key: &str, pdf: Bytes) -> Result<()> {
    let size = pdf.len();
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(pdf))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

    info!("Uploaded {size} byte PDF to s3://{bucket}/{key}");
    Ok(())
}

/// Path-style URL, which both MinIO and S3 accept.
pub fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'))
}
