use crate::domain::model::{Country, EntityId, Item, Port};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// 參考資料來源（國家、港口、商品）
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    async fn countries(&self) -> Result<Vec<Country>>;
    async fn ports(&self, country_id: &EntityId) -> Result<Vec<Port>>;
    async fn items(&self, port_id: &EntityId) -> Result<Vec<Item>>;
}

/// 重設前的確認對話框內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmPrompt {
    pub fn reset() -> Self {
        Self {
            title: "Are you sure?".to_string(),
            message: "This action will reset all selections. Are you sure you want to proceed?"
                .to_string(),
            confirm_label: "Yes, reset it!".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

#[async_trait]
pub trait ConfirmationService: Send + Sync {
    /// 回傳使用者是否確認
    async fn confirm(&self, prompt: &ConfirmPrompt) -> Result<bool>;

    /// 動作完成後的提示
    async fn acknowledge(&self, title: &str, message: &str) -> Result<()>;
}

#[async_trait]
impl<T: ConfirmationService + ?Sized> ConfirmationService for Arc<T> {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> Result<bool> {
        (**self).confirm(prompt).await
    }

    async fn acknowledge(&self, title: &str, message: &str) -> Result<()> {
        (**self).acknowledge(title, message).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn countries_resource(&self) -> &str;
    fn ports_resource(&self) -> &str;
    fn items_resource(&self) -> &str;
}
