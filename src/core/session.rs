use crate::core::selector::CascadingSelector;
use crate::core::view::FormView;
use crate::domain::ports::{ConfirmPrompt, ConfirmationService, ReferenceDataProvider};
use crate::utils::currency::{AmountFormatter, RupiahFormatter};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// 尚未選擇國家，重設按鈕不可用
    Unavailable,
    Cancelled,
    Confirmed,
}

/// 表單的事件處理：每個選擇先同步更新狀態，再明確地發出下一層的抓取。
///
/// `select_country` / `select_port` 會等抓取完成才返回，所以逐行互動時看不到
/// "Loading..."；要並行抓取請直接使用 [`CascadingSelector`] 的憑證 API。
pub struct FormSession<P: ReferenceDataProvider, C: ConfirmationService> {
    selector: CascadingSelector,
    provider: P,
    confirmation: C,
    formatter: Box<dyn AmountFormatter>,
}

impl<P: ReferenceDataProvider, C: ConfirmationService> FormSession<P, C> {
    pub fn new(provider: P, confirmation: C) -> Self {
        Self::with_formatter(provider, confirmation, Box::new(RupiahFormatter))
    }

    pub fn with_formatter(
        provider: P,
        confirmation: C,
        formatter: Box<dyn AmountFormatter>,
    ) -> Self {
        Self {
            selector: CascadingSelector::new(),
            provider,
            confirmation,
            formatter,
        }
    }

    pub fn selector(&self) -> &CascadingSelector {
        &self.selector
    }

    pub async fn init(&mut self) {
        let ticket = self.selector.begin_countries();
        let outcome = self.provider.countries().await;
        self.selector.complete_countries(&ticket, outcome);
        tracing::info!("📋 {} countries available", self.selector.countries().len());
    }

    pub async fn select_country(&mut self, raw_id: &str) -> Result<()> {
        if let Some(ticket) = self.selector.on_country_change(raw_id)? {
            if let Some(country_id) = ticket.parent() {
                let outcome = self.provider.ports(country_id).await;
                self.selector.complete_ports(&ticket, outcome);
            }
        }
        Ok(())
    }

    pub async fn select_port(&mut self, raw_id: &str) -> Result<()> {
        if let Some(ticket) = self.selector.on_port_change(raw_id)? {
            if let Some(port_id) = ticket.parent() {
                let outcome = self.provider.items(port_id).await;
                self.selector.complete_items(&ticket, outcome);
            }
        }
        Ok(())
    }

    pub fn select_item(&mut self, raw_id: &str) -> Result<()> {
        self.selector.on_item_change(raw_id)
    }

    pub async fn reset(&mut self) -> Result<ResetOutcome> {
        if !self.selector.can_reset() {
            return Ok(ResetOutcome::Unavailable);
        }

        if !self.confirmation.confirm(&ConfirmPrompt::reset()).await? {
            tracing::debug!("Reset cancelled");
            return Ok(ResetOutcome::Cancelled);
        }

        self.selector.clear();
        tracing::info!("🔄 Selections reset");
        self.confirmation
            .acknowledge("Reset!", "Your selections have been reset.")
            .await?;
        Ok(ResetOutcome::Confirmed)
    }

    pub fn view(&self) -> FormView {
        FormView::render(&self.selector, self.formatter.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Country, EntityId, Item, Level, Port};
    use crate::utils::error::PickerError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn id(raw: &str) -> EntityId {
        EntityId::parse(raw).unwrap()
    }

    struct FakeProvider;

    #[async_trait]
    impl ReferenceDataProvider for FakeProvider {
        async fn countries(&self) -> Result<Vec<Country>> {
            Ok(vec![Country {
                id: id("1"),
                display_name: "Indonesia".to_string(),
            }])
        }

        async fn ports(&self, country_id: &EntityId) -> Result<Vec<Port>> {
            Ok(vec![Port {
                id: id("10"),
                display_name: "Jakarta".to_string(),
                country_id: country_id.clone(),
            }])
        }

        async fn items(&self, _port_id: &EntityId) -> Result<Vec<Item>> {
            Err(PickerError::HttpStatus {
                resource: "barangs".to_string(),
                status: 503,
            })
        }
    }

    struct ScriptedConfirmation {
        answer: bool,
        prompts: Mutex<Vec<String>>,
        acknowledgements: Mutex<Vec<String>>,
    }

    impl ScriptedConfirmation {
        fn answering(answer: bool) -> Self {
            Self {
                answer,
                prompts: Mutex::new(Vec::new()),
                acknowledgements: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ConfirmationService for ScriptedConfirmation {
        async fn confirm(&self, prompt: &ConfirmPrompt) -> Result<bool> {
            self.prompts.lock().unwrap().push(prompt.title.clone());
            Ok(self.answer)
        }

        async fn acknowledge(&self, title: &str, _message: &str) -> Result<()> {
            self.acknowledgements.lock().unwrap().push(title.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_session_flow_with_failing_items() {
        tokio_test::block_on(async {
            let mut session = FormSession::new(FakeProvider, ScriptedConfirmation::answering(true));
            session.init().await;
            assert_eq!(session.selector().countries().len(), 1);

            session.select_country("1").await.unwrap();
            assert_eq!(session.selector().ports().len(), 1);

            session.select_port("10").await.unwrap();
            assert!(session.selector().items().is_empty());
            assert!(!session.selector().is_loading(Level::Item));
        });
    }

    #[test]
    fn test_reset_unavailable_without_country() {
        tokio_test::block_on(async {
            let mut session = FormSession::new(FakeProvider, ScriptedConfirmation::answering(true));
            session.init().await;

            assert_eq!(session.reset().await.unwrap(), ResetOutcome::Unavailable);
            assert!(session.confirmation.prompts.lock().unwrap().is_empty());
        });
    }

    #[test]
    fn test_cancelled_reset_keeps_state() {
        tokio_test::block_on(async {
            let mut session =
                FormSession::new(FakeProvider, ScriptedConfirmation::answering(false));
            session.init().await;
            session.select_country("1").await.unwrap();
            let before = session.selector().selection().clone();

            assert_eq!(session.reset().await.unwrap(), ResetOutcome::Cancelled);
            assert_eq!(session.selector().selection(), &before);
            assert_eq!(session.selector().ports().len(), 1);
            assert!(session.confirmation.acknowledgements.lock().unwrap().is_empty());
        });
    }

    #[test]
    fn test_confirmed_reset_clears_everything() {
        tokio_test::block_on(async {
            let mut session = FormSession::new(FakeProvider, ScriptedConfirmation::answering(true));
            session.init().await;
            session.select_country("1").await.unwrap();

            assert_eq!(session.reset().await.unwrap(), ResetOutcome::Confirmed);
            assert!(session.selector().selection().country.is_none());
            assert!(session.selector().ports().is_empty());
            assert_eq!(
                session.confirmation.prompts.lock().unwrap().as_slice(),
                ["Are you sure?".to_string()]
            );
            assert_eq!(
                session.confirmation.acknowledgements.lock().unwrap().as_slice(),
                ["Reset!".to_string()]
            );
        });
    }
}
