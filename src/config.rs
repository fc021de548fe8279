// config.rs
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const REALTOR_SEARCH_URL: &str = "https://api2.realtor.ca/Listing.svc/PropertySearch_Post";
pub const APIFY_BASE_URL: &str = "https://api.apify.com/v2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),
}

/// Which investment play a run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Detached house with a legal basement unit; live upstairs or rent both.
    Residential,
    /// Duplex / triplex / fourplex bought for rental income.
    Multiplex,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Residential => "residential",
            Profile::Multiplex => "multiplex",
        }
    }
}

#[derive(Debug, Clone)]
pub enum SourceConfig {
    Realtor,
    Apify { dataset_id: String, token: String },
    File { path: PathBuf },
}

/// A map bounding box sent as one search request.
#[derive(Debug, Clone)]
pub struct SearchArea {
    pub name: String,
    pub zoom_level: u8,
    pub latitude_max: f64,
    pub longitude_max: f64,
    pub latitude_min: f64,
    pub longitude_min: f64,
}

impl SearchArea {
    fn new(name: &str, zoom_level: u8, lat_max: f64, lon_max: f64, lat_min: f64, lon_min: f64) -> Self {
        Self {
            name: name.to_string(),
            zoom_level,
            latitude_max: lat_max,
            longitude_max: lon_max,
            latitude_min: lat_min,
            longitude_min: lon_min,
        }
    }
}

/// Search filters shared by every area of a profile.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub property_search_type_id: u8,
    pub price_min: u64,
    pub price_max: u64,
    pub bed_range: Option<String>,
    pub bath_range: Option<String>,
    pub unit_range: Option<String>,
    pub building_type_id: Option<u8>,
    pub construction_style_id: Option<u8>,
    pub keywords: Option<String>,
    pub records_per_page: u32,
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub areas: Vec<SearchArea>,
    pub query: SearchQuery,
    /// Value of the `reese84` session cookie the site expects.
    pub cookie: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub min_bedrooms: u32,
    pub min_bathrooms: u32,
    pub min_parking: u32,
    /// Lower-cased; empty means no keyword requirement.
    pub keywords: Vec<String>,
    pub max_age_years: Option<u32>,
    /// Amenities, lot size and basement features must all be present.
    pub require_details: bool,
    /// Normalized type names; empty means any type.
    pub property_types: Vec<String>,
    pub current_year: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct MortgageTerms {
    pub annual_rate: f64,
    pub amortization_years: u32,
}

#[derive(Debug, Clone)]
pub struct SingleUnitAssumptions {
    pub upstairs_rent: f64,
    pub basement_rent: f64,
    pub monthly_utilities: f64,
    pub monthly_insurance_misc: f64,
    pub first_time_downpayment: f64,
    pub investor_downpayment: f64,
}

#[derive(Debug, Clone)]
pub struct MultiUnitAssumptions {
    pub downpayment: f64,
    pub annual_expense_ratio: f64,
    pub rent_by_city: Vec<(String, f64)>,
    pub default_rent: f64,
}

impl MultiUnitAssumptions {
    pub fn rent_for(&self, city: &str) -> f64 {
        self.rent_by_city
            .iter()
            .find(|(name, _)| name == city)
            .map(|(_, rent)| *rent)
            .unwrap_or(self.default_rent)
    }
}

#[derive(Debug, Clone)]
pub enum CashflowModel {
    SingleUnit(SingleUnitAssumptions),
    MultiUnit(MultiUnitAssumptions),
}

#[derive(Debug, Clone)]
pub enum RankingPolicy {
    TopN {
        n: usize,
    },
    ByCity {
        per_city: usize,
        min_cashflow: f64,
        preferred_cities: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `=== Property #n ===` headers, footer on every post.
    Numbered,
    /// One headline, all posts, call to action, single footer.
    Digest,
}

#[derive(Debug, Clone)]
pub struct ContactFooter {
    pub agent_line: String,
    pub agent_phone: String,
    pub team_line: String,
    pub team_phone: String,
}

impl Default for ContactFooter {
    fn default() -> Self {
        Self {
            agent_line: "To get PreApproved for these deals reach out to our Mortgage Agent".into(),
            agent_phone: "+1(000)000-0000".into(),
            team_line: "Property details exclusive for our clients, DM for more information".into(),
            team_phone: "+1(000)000-0000".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub file_name: String,
    pub xlsx: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub profile: Profile,
    pub source: SourceConfig,
    pub search: SearchConfig,
    pub criteria: FilterCriteria,
    pub mortgage: MortgageTerms,
    pub cashflow: CashflowModel,
    pub ranking: RankingPolicy,
    pub layout: Layout,
    pub contact: ContactFooter,
    pub output: OutputConfig,
}

const MULTIPLEX_TYPES: [&str; 6] = ["duplex", "triplex", "fourplex", "multiplex", "quadruplex", "4plex"];

const LEGAL_BASEMENT_KEYWORDS: [&str; 7] = [
    "legal basement",
    "second dwelling",
    "registered basement",
    "2nd unit",
    "legal second unit",
    "income suite",
    "dual dwelling",
];

impl Config {
    /// Built-in settings for a profile. No environment is read here.
    pub fn preset(profile: Profile, current_year: i32) -> Self {
        match profile {
            Profile::Residential => Self::residential(current_year),
            Profile::Multiplex => Self::multiplex(current_year),
        }
    }

    fn residential(current_year: i32) -> Self {
        Self {
            profile: Profile::Residential,
            source: SourceConfig::Realtor,
            search: SearchConfig {
                endpoint: REALTOR_SEARCH_URL.to_string(),
                areas: vec![SearchArea::new("Brampton", 10, 43.96034, -79.13541, 43.48894, -80.38373)],
                query: SearchQuery {
                    property_search_type_id: 1,
                    price_min: 700_000,
                    price_max: 1_000_000,
                    bed_range: Some("4-0".into()),
                    bath_range: Some("3-0".into()),
                    unit_range: None,
                    building_type_id: Some(1),
                    construction_style_id: Some(3),
                    keywords: Some("Legal BASEMENT".into()),
                    records_per_page: 100,
                },
                cookie: None,
                timeout: Duration::from_secs(30),
            },
            criteria: FilterCriteria {
                min_bedrooms: 3,
                min_bathrooms: 2,
                min_parking: 2,
                keywords: LEGAL_BASEMENT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
                max_age_years: None,
                require_details: false,
                property_types: Vec::new(),
                current_year,
            },
            mortgage: MortgageTerms {
                annual_rate: 0.04,
                amortization_years: 30,
            },
            cashflow: CashflowModel::SingleUnit(SingleUnitAssumptions {
                upstairs_rent: 3000.0,
                basement_rent: 1800.0,
                monthly_utilities: 300.0,
                monthly_insurance_misc: 200.0,
                first_time_downpayment: 0.10,
                investor_downpayment: 0.20,
            }),
            ranking: RankingPolicy::TopN { n: 5 },
            layout: Layout::Numbered,
            contact: ContactFooter::default(),
            output: OutputConfig {
                dir: PathBuf::from("output"),
                file_name: "output.txt".into(),
                xlsx: false,
            },
        }
    }

    fn multiplex(current_year: i32) -> Self {
        let query = SearchQuery {
            property_search_type_id: 8,
            price_min: 650_000,
            price_max: 850_000,
            bed_range: None,
            bath_range: None,
            unit_range: Some("3-0".into()),
            building_type_id: None,
            construction_style_id: None,
            keywords: None,
            records_per_page: 100,
        };

        Self {
            profile: Profile::Multiplex,
            source: SourceConfig::Realtor,
            search: SearchConfig {
                endpoint: REALTOR_SEARCH_URL.to_string(),
                areas: vec![
                    SearchArea::new("London", 10, 43.18728, -80.62437, 42.70981, -81.87270),
                    SearchArea::new("Kitchener-Waterloo", 11, 43.54874, -80.16433, 43.31188, -80.78850),
                    SearchArea::new("Brantford", 10, 43.20706, -80.11805, 43.08808, -80.43013),
                ],
                query,
                cookie: None,
                timeout: Duration::from_secs(30),
            },
            criteria: FilterCriteria {
                min_bedrooms: 0,
                min_bathrooms: 0,
                min_parking: 0,
                keywords: Vec::new(),
                max_age_years: None,
                require_details: false,
                property_types: MULTIPLEX_TYPES.iter().map(|t| t.to_string()).collect(),
                current_year,
            },
            mortgage: MortgageTerms {
                annual_rate: 0.04,
                amortization_years: 25,
            },
            cashflow: CashflowModel::MultiUnit(MultiUnitAssumptions {
                downpayment: 0.20,
                annual_expense_ratio: 0.02,
                rent_by_city: vec![
                    ("London".into(), 1500.0),
                    ("Kitchener".into(), 1700.0),
                    ("Brantford".into(), 1400.0),
                ],
                default_rent: 1500.0,
            }),
            ranking: RankingPolicy::ByCity {
                per_city: 4,
                min_cashflow: 500.0,
                preferred_cities: vec!["London".into(), "Kitchener".into(), "Brantford".into()],
            },
            layout: Layout::Digest,
            contact: ContactFooter::default(),
            output: OutputConfig {
                dir: PathBuf::from("output"),
                file_name: "output.txt".into(),
                xlsx: false,
            },
        }
    }

    /// Residential only: age at most 35 years and all detail fields present.
    /// A no-op for the multiplex profile.
    pub fn strict(mut self) -> Self {
        if self.profile == Profile::Residential {
            self.criteria.max_age_years = Some(35);
            self.criteria.require_details = true;
        }
        self
    }

    /// Overlay values from the process environment (and `.env`, if present).
    pub fn with_env(mut self) -> Self {
        let _ = dotenv();

        if let Ok(cookie) = env::var("REALTOR_COOKIE") {
            self.search.cookie = Some(cookie);
        }
        if let Ok(dir) = env::var("OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }
        if let Ok(v) = env::var("CONTACT_AGENT") {
            self.contact.agent_line = v;
        }
        if let Ok(v) = env::var("CONTACT_AGENT_PHONE") {
            self.contact.agent_phone = v;
        }
        if let Ok(v) = env::var("CONTACT_TEAM") {
            self.contact.team_line = v;
        }
        if let Ok(v) = env::var("CONTACT_TEAM_PHONE") {
            self.contact.team_phone = v;
        }
        self
    }

    pub fn apify_source(mut self, dataset_id: String) -> Result<Self, ConfigError> {
        let token = env::var("APIFY_TOKEN").map_err(|_| ConfigError::MissingEnv("APIFY_TOKEN"))?;
        self.source = SourceConfig::Apify { dataset_id, token };
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mortgage.annual_rate > 0.0) {
            return Err(ConfigError::Invalid("mortgage rate must be positive".into()));
        }
        if self.mortgage.amortization_years == 0 {
            return Err(ConfigError::Invalid("amortization years must be positive".into()));
        }

        let downpayments: Vec<f64> = match &self.cashflow {
            CashflowModel::SingleUnit(a) => vec![a.first_time_downpayment, a.investor_downpayment],
            CashflowModel::MultiUnit(a) => vec![a.downpayment],
        };
        if downpayments.iter().any(|f| !(*f > 0.0 && *f < 1.0)) {
            return Err(ConfigError::Invalid("downpayment fraction must be between 0 and 1".into()));
        }

        match &self.ranking {
            RankingPolicy::TopN { n } if *n == 0 => {
                Err(ConfigError::Invalid("top-N must be at least 1".into()))
            }
            RankingPolicy::ByCity { per_city, .. } if *per_city == 0 => {
                Err(ConfigError::Invalid("per-city cap must be at least 1".into()))
            }
            _ => Ok(()),
        }
    }
}
