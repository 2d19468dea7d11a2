use crate::domain::model::{Country, EntityId, Item, Level, Port, Selection};
use crate::utils::error::{PickerError, Result};

/// 一次抓取的憑證。
///
/// 每個層級各自維護序號，任何變更或清除都會讓序號前進，
/// 舊憑證帶回來的結果因此會被丟棄。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    level: Level,
    parent: Option<EntityId>,
    seq: u64,
}

impl FetchTicket {
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn parent(&self) -> Option<&EntityId> {
        self.parent.as_ref()
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone)]
struct LevelList<T> {
    options: Vec<T>,
    loading: bool,
    seq: u64,
}

impl<T> LevelList<T> {
    fn new(loading: bool) -> Self {
        Self {
            options: Vec::new(),
            loading,
            seq: 0,
        }
    }

    fn begin(&mut self, level: Level, parent: Option<EntityId>) -> FetchTicket {
        self.seq += 1;
        self.options.clear();
        self.loading = true;
        FetchTicket {
            level,
            parent,
            seq: self.seq,
        }
    }

    fn invalidate(&mut self) {
        self.seq += 1;
        self.options.clear();
        self.loading = false;
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.seq
    }

    fn finish(&mut self, options: Vec<T>) {
        self.options = options;
        self.loading = false;
    }
}

/// 國家 → 港口 → 商品 的連動選單狀態
#[derive(Debug, Clone)]
pub struct CascadingSelector {
    countries: LevelList<Country>,
    ports: LevelList<Port>,
    items: LevelList<Item>,
    selection: Selection,
}

impl Default for CascadingSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl CascadingSelector {
    pub fn new() -> Self {
        Self {
            // 國家清單在初始化時就要抓，一開始即為載入中
            countries: LevelList::new(true),
            ports: LevelList::new(false),
            items: LevelList::new(false),
            selection: Selection::default(),
        }
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries.options
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports.options
    }

    pub fn items(&self) -> &[Item] {
        &self.items.options
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn total(&self) -> Option<f64> {
        self.selection.total
    }

    pub fn is_loading(&self, level: Level) -> bool {
        match level {
            Level::Country => self.countries.loading,
            Level::Port => self.ports.loading,
            Level::Item => self.items.loading,
        }
    }

    /// 該層級是否可操作（上一層已選擇）
    pub fn is_enabled(&self, level: Level) -> bool {
        match level {
            Level::Country => true,
            Level::Port => self.selection.country.is_some(),
            Level::Item => self.selection.port.is_some(),
        }
    }

    pub fn can_reset(&self) -> bool {
        self.selection.country.is_some()
    }

    pub fn begin_countries(&mut self) -> FetchTicket {
        self.countries.begin(Level::Country, None)
    }

    pub fn complete_countries(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<Vec<Country>>,
    ) -> bool {
        if !Self::accepts(Level::Country, self.countries.is_current(ticket), ticket) {
            return false;
        }
        let countries = Self::absorb(Level::Country, outcome, |_| true);
        tracing::debug!("Loaded {} countries", countries.len());
        self.countries.finish(countries);
        true
    }

    pub fn on_country_change(&mut self, raw_id: &str) -> Result<Option<FetchTicket>> {
        if self.countries.loading {
            return Err(PickerError::rejected(
                Level::Country,
                "country list is still loading",
            ));
        }

        // 取清單裡的 id，保留服務端給的型別
        let id = match EntityId::parse(raw_id) {
            Some(wanted) => Some(
                self.countries
                    .options
                    .iter()
                    .find(|c| c.id == wanted)
                    .map(|c| c.id.clone())
                    .ok_or_else(|| {
                        PickerError::rejected(
                            Level::Country,
                            format!("unknown country id '{}'", wanted),
                        )
                    })?,
            ),
            None => None,
        };

        self.selection = Selection {
            country: id.clone(),
            ..Selection::default()
        };
        self.items.invalidate();

        match id {
            Some(id) => {
                tracing::debug!("Country '{}' selected, fetching ports", id);
                Ok(Some(self.ports.begin(Level::Port, Some(id))))
            }
            None => {
                tracing::debug!("Country cleared");
                self.ports.invalidate();
                Ok(None)
            }
        }
    }

    pub fn complete_ports(&mut self, ticket: &FetchTicket, outcome: Result<Vec<Port>>) -> bool {
        if !Self::accepts(Level::Port, self.ports.is_current(ticket), ticket) {
            return false;
        }
        let ports = Self::absorb(Level::Port, outcome, |p: &Port| {
            ticket.parent() == Some(&p.country_id)
        });
        tracing::debug!("Loaded {} ports", ports.len());
        self.ports.finish(ports);
        true
    }

    pub fn on_port_change(&mut self, raw_id: &str) -> Result<Option<FetchTicket>> {
        if self.selection.country.is_none() {
            return Err(PickerError::rejected(Level::Port, "no country selected"));
        }
        if self.ports.loading {
            return Err(PickerError::rejected(
                Level::Port,
                "port list is still loading",
            ));
        }

        // 取清單裡的 id，保留服務端給的型別
        let id = match EntityId::parse(raw_id) {
            Some(wanted) => Some(
                self.ports
                    .options
                    .iter()
                    .find(|p| p.id == wanted)
                    .map(|p| p.id.clone())
                    .ok_or_else(|| {
                        PickerError::rejected(
                            Level::Port,
                            format!("unknown port id '{}'", wanted),
                        )
                    })?,
            ),
            None => None,
        };

        self.selection.port = id.clone();
        self.selection.item = None;
        self.selection.total = None;

        match id {
            Some(id) => {
                tracing::debug!("Port '{}' selected, fetching items", id);
                Ok(Some(self.items.begin(Level::Item, Some(id))))
            }
            None => {
                tracing::debug!("Port cleared");
                self.items.invalidate();
                Ok(None)
            }
        }
    }

    pub fn complete_items(&mut self, ticket: &FetchTicket, outcome: Result<Vec<Item>>) -> bool {
        if !Self::accepts(Level::Item, self.items.is_current(ticket), ticket) {
            return false;
        }
        let items = Self::absorb(Level::Item, outcome, |i: &Item| {
            ticket.parent() == Some(&i.port_id)
        });
        tracing::debug!("Loaded {} items", items.len());
        self.items.finish(items);
        true
    }

    /// 找不到對應的商品時，選擇與總價一起清空
    pub fn on_item_change(&mut self, raw_id: &str) -> Result<()> {
        if self.selection.port.is_none() {
            return Err(PickerError::rejected(Level::Item, "no port selected"));
        }
        if self.items.loading {
            return Err(PickerError::rejected(
                Level::Item,
                "item list is still loading",
            ));
        }

        let found = EntityId::parse(raw_id)
            .and_then(|id| self.items.options.iter().find(|i| i.id == id).cloned());

        if found.is_none() && !raw_id.is_empty() {
            tracing::debug!("Item '{}' not in the current list, clearing selection", raw_id);
        }

        self.selection.total = found.as_ref().map(Item::discounted_total);
        self.selection.item = found;
        Ok(())
    }

    /// 重設：清除港口、商品清單與所有選擇，國家清單保留
    pub fn clear(&mut self) {
        self.ports.invalidate();
        self.items.invalidate();
        self.selection = Selection::default();
    }

    fn accepts(level: Level, current: bool, ticket: &FetchTicket) -> bool {
        if ticket.level != level {
            tracing::warn!(
                "Ignoring {} ticket handed to the {} level",
                ticket.level,
                level
            );
            return false;
        }
        if !current {
            tracing::debug!(
                "Discarding superseded {} response (ticket #{})",
                level,
                ticket.seq
            );
            return false;
        }
        true
    }

    fn absorb<T>(level: Level, outcome: Result<Vec<T>>, in_scope: impl Fn(&T) -> bool) -> Vec<T> {
        match outcome {
            Ok(records) => {
                let received = records.len();
                let kept: Vec<T> = records.into_iter().filter(|r| in_scope(r)).collect();
                if kept.len() != received {
                    tracing::warn!(
                        "Dropped {} {} record(s) belonging to another parent",
                        received - kept.len(),
                        level
                    );
                }
                kept
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to fetch {} options: {}", level, e);
                Vec::new()
            }
        }
    }
}
