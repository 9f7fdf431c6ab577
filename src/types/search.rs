//! Player search filter criteria.

use serde::{Deserialize, Serialize};

use super::Platform;

/// Preferred foot filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    fn as_str(self) -> &'static str {
        match self {
            Foot::Left => "Left",
            Foot::Right => "Right",
        }
    }
}

/// Work rate filter value (attacking or defensive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkRate {
    High,
    Medium,
    Low,
}

impl WorkRate {
    fn as_str(self) -> &'static str {
        match self {
            WorkRate::High => "High",
            WorkRate::Medium => "Med",
            WorkRate::Low => "Low",
        }
    }
}

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Filter criteria for the player search endpoint.
///
/// Platform and page are always transmitted; every other field is
/// optional and, when unset, is omitted from the query string entirely,
/// never sent as null, zero, or an empty string. `to_params()` emits set
/// fields in declaration order, which doubles as the canonical argument
/// order for cache keying.
///
/// ```rust
/// use futmarket::{Platform, SearchOptions};
///
/// let opts = SearchOptions::default()
///     .platform(Platform::Ps)
///     .min_rating(85)
///     .league(13);
/// assert_eq!(
///     opts.to_params(),
///     vec![
///         ("platform", "PS".to_string()),
///         ("page", "1".to_string()),
///         ("minrating", "85".to_string()),
///         ("league", "13".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    pub platform: Platform,
    pub page: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,

    /// Position codes, e.g. `ST`, `CAM`. Comma-joined on the wire.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub position: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nation: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<u64>,
    /// Card version key from the versions catalogue, e.g. "gold_rare".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    // Attribute bounds. Set directly; there is one field pair per
    // in-game attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pace: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pace: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_shooting: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_shooting: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_passing: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_passing: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_dribbling: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dribbling: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_defending: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_defending: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_physical: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_physical: Option<u32>,

    /// Skill moves stars (1–5).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_skills: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_skills: Option<u32>,
    /// Weak foot stars (1–5).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_weak_foot: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_weak_foot: Option<u32>,
    /// Height in centimetres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    /// Weight in kilograms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_weight: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foot: Option<Foot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub att_work_rate: Option<WorkRate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub def_work_rate: Option<WorkRate>,

    /// Sort key, e.g. "rating" or "price".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            page: 1,
            min_rating: None,
            max_rating: None,
            min_price: None,
            max_price: None,
            position: Vec::new(),
            nation: None,
            league: None,
            club: None,
            version: None,
            min_pace: None,
            max_pace: None,
            min_shooting: None,
            max_shooting: None,
            min_passing: None,
            max_passing: None,
            min_dribbling: None,
            max_dribbling: None,
            min_defending: None,
            max_defending: None,
            min_physical: None,
            max_physical: None,
            min_skills: None,
            max_skills: None,
            min_weak_foot: None,
            max_weak_foot: None,
            min_height: None,
            max_height: None,
            min_weight: None,
            max_weight: None,
            foot: None,
            att_work_rate: None,
            def_work_rate: None,
            sort: None,
            order: None,
        }
    }
}

impl SearchOptions {
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn min_rating(mut self, rating: u32) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn max_rating(mut self, rating: u32) -> Self {
        self.max_rating = Some(rating);
        self
    }

    pub fn min_price(mut self, price: u64) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: u64) -> Self {
        self.max_price = Some(price);
        self
    }

    /// Add a position code to the filter, e.g. "ST".
    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position.push(position.into());
        self
    }

    pub fn nation(mut self, nation_id: u64) -> Self {
        self.nation = Some(nation_id);
        self
    }

    pub fn league(mut self, league_id: u64) -> Self {
        self.league = Some(league_id);
        self
    }

    pub fn club(mut self, club_id: u64) -> Self {
        self.club = Some(club_id);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn foot(mut self, foot: Foot) -> Self {
        self.foot = Some(foot);
        self
    }

    pub fn sort(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(key.into());
        self.order = Some(order);
        self
    }

    /// Query parameters for the search endpoint: set fields only, in
    /// declaration order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = vec![
            ("platform", self.platform.as_str().to_string()),
            ("page", self.page.to_string()),
        ];

        fn push<T: ToString>(
            params: &mut Vec<(&'static str, String)>,
            key: &'static str,
            value: &Option<T>,
        ) {
            if let Some(v) = value {
                params.push((key, v.to_string()));
            }
        }

        push(&mut params, "minrating", &self.min_rating);
        push(&mut params, "maxrating", &self.max_rating);
        push(&mut params, "minprice", &self.min_price);
        push(&mut params, "maxprice", &self.max_price);
        if !self.position.is_empty() {
            params.push(("position", self.position.join(",")));
        }
        push(&mut params, "nation", &self.nation);
        push(&mut params, "league", &self.league);
        push(&mut params, "club", &self.club);
        push(&mut params, "version", &self.version);
        push(&mut params, "minpace", &self.min_pace);
        push(&mut params, "maxpace", &self.max_pace);
        push(&mut params, "minshooting", &self.min_shooting);
        push(&mut params, "maxshooting", &self.max_shooting);
        push(&mut params, "minpassing", &self.min_passing);
        push(&mut params, "maxpassing", &self.max_passing);
        push(&mut params, "mindribbling", &self.min_dribbling);
        push(&mut params, "maxdribbling", &self.max_dribbling);
        push(&mut params, "mindefending", &self.min_defending);
        push(&mut params, "maxdefending", &self.max_defending);
        push(&mut params, "minphysical", &self.min_physical);
        push(&mut params, "maxphysical", &self.max_physical);
        push(&mut params, "minskills", &self.min_skills);
        push(&mut params, "maxskills", &self.max_skills);
        push(&mut params, "minweakfoot", &self.min_weak_foot);
        push(&mut params, "maxweakfoot", &self.max_weak_foot);
        push(&mut params, "minheight", &self.min_height);
        push(&mut params, "maxheight", &self.max_height);
        push(&mut params, "minweight", &self.min_weight);
        push(&mut params, "maxweight", &self.max_weight);
        if let Some(foot) = self.foot {
            params.push(("foot", foot.as_str().to_string()));
        }
        if let Some(wr) = self.att_work_rate {
            params.push(("attworkrate", wr.as_str().to_string()));
        }
        if let Some(wr) = self.def_work_rate {
            params.push(("defworkrate", wr.as_str().to_string()));
        }
        push(&mut params, "sort", &self.sort);
        if let Some(order) = self.order {
            params.push(("order", order.as_str().to_string()));
        }

        params
    }
}
