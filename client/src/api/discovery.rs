//! Discovery-service endpoints: reference code lists

use super::ApiClient;
use crate::error::ClientResult;
use shared::{Code, CodeCategory};

impl ApiClient {
    /// Fetch a reference code list (countries, languages, licenses) in the
    /// requested locale
    pub async fn codes(&self, category: CodeCategory, locale: &str) -> ClientResult<Vec<Code>> {
        self.get_json(&format!(
            "discovery/codes/{}?locale={}",
            category.as_str(),
            locale
        ))
        .await
    }
}
