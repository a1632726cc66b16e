//! Payment Code
//!
//! The storefront reuses one merchant QRIS payload for every transaction.
//! The scannable image is rendered by a third-party endpoint from the payload
//! text alone.

use url::Url;

use crate::pricing::{Price, format_rupiah};

/// Merchant QRIS payload shown for every payment.
pub const STATIC_QRIS_PAYLOAD: &str = "00020101021126670016COM.NOBUBANK.WWW01189360050300000879140214758009185656360303UMI51440014ID.CO.QRIS.WWW0215ID20243553629120303UMI5204541153033605802ID5923SINGSAE BIBIL OK21034656008BANYUMAS61055319462070703A0163044D67";

/// Endpoint that renders a payload as a QR image.
pub const QR_RENDER_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Rendered image size, `<width>x<height>` in pixels.
pub const QR_IMAGE_SIZE: &str = "200x200";

/// Payment code displayed to the buyer.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentCode {
    payload: String,
    amount: Price,
}

impl PaymentCode {
    /// Code for `amount` using the merchant's static payload.
    pub fn new(amount: Price) -> Self {
        Self::with_payload(STATIC_QRIS_PAYLOAD, amount)
    }

    /// Code for `amount` using a custom payload.
    pub fn with_payload(payload: impl Into<String>, amount: Price) -> Self {
        Self {
            payload: payload.into(),
            amount,
        }
    }

    /// Payload text to scan.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Amount the buyer is asked to pay.
    pub fn amount(&self) -> &Price {
        &self.amount
    }

    /// Caption shown under the code.
    pub fn label(&self) -> String {
        format!("QRIS Static - {}", format_rupiah(&self.amount))
    }

    /// URL of the rendered QR image.
    ///
    /// # Errors
    ///
    /// Returns a [`url::ParseError`] if the render endpoint is not a valid URL.
    pub fn image_url(&self) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            QR_RENDER_ENDPOINT,
            [("size", QR_IMAGE_SIZE), ("data", self.payload.as_str())],
        )
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::pricing::rupiah;

    use super::*;

    #[test]
    fn image_url_embeds_the_payload() -> TestResult {
        let code = PaymentCode::with_payload("0002&01=X", rupiah(120_000)?);

        let url = code.image_url()?;

        assert_eq!(url.host_str(), Some("api.qrserver.com"));
        assert_eq!(url.path(), "/v1/create-qr-code/");

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            params,
            [
                ("size".to_string(), "200x200".to_string()),
                ("data".to_string(), "0002&01=X".to_string()),
            ]
        );

        Ok(())
    }

    #[test]
    fn label_shows_the_amount() -> TestResult {
        let code = PaymentCode::new(rupiah(120_000)?);

        assert_eq!(code.label(), "QRIS Static - Rp 120.000");
        assert_eq!(code.payload(), STATIC_QRIS_PAYLOAD);

        Ok(())
    }
}
