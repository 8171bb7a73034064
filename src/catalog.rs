//! In-memory app catalog
//!
//! Seeded with the showcase apps; new submissions are prepended in the
//! Vibe stage. Nothing is persisted.

use crate::types::{AppEntry, AppStage};
use chrono::{Duration, Utc};

/// Ordered list of listed apps, newest submission first
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<AppEntry>,
}

struct Seed {
    id: &'static str,
    name: &'static str,
    link: &'static str,
    author: &'static str,
    likes: u32,
    contributors: Option<u32>,
    user_count: Option<u32>,
    vibe_score: u8,
    description: &'static str,
    age_secs: i64,
    stage: AppStage,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        name: "Homo Agenticus",
        link: "http://homo.agenticus.eu",
        author: "The_Architect",
        likes: 0,
        contributors: None,
        user_count: None,
        vibe_score: 99,
        description: "Autonomous agentic humans who make informed decisions",
        age_secs: 10_000,
        stage: AppStage::Vibe,
    },
    Seed {
        id: "8",
        name: "Vibes 4 Humanity",
        link: "http://vibes4humanity.agenticus.eu",
        author: "The_Master_Viber",
        likes: 0,
        contributors: Some(1),
        user_count: None,
        vibe_score: 99,
        description: "Choose your future job",
        age_secs: 10_000,
        stage: AppStage::Vibe,
    },
    Seed {
        id: "2",
        name: "Sapiens Goal Tracker",
        link: "http://sapiensgoaltracker.agenticus.eu",
        author: "Chronos_Surfer",
        likes: 0,
        contributors: None,
        user_count: None,
        vibe_score: 95,
        description: "Goal tracker app to support realistic evolution of navigating through life",
        age_secs: 5_000,
        stage: AppStage::Vibe,
    },
    Seed {
        id: "3",
        name: "AI before humans",
        link: "#",
        author: "Closed_Mind",
        likes: 0,
        contributors: None,
        user_count: None,
        vibe_score: 88,
        description: "AIs and AI masters must rule the world.",
        age_secs: 2_000,
        stage: AppStage::Vibe,
    },
    Seed {
        id: "9",
        name: "Funnel of Vibes",
        link: "https://agenticus.eu",
        author: "Community",
        likes: 1,
        contributors: Some(1),
        user_count: Some(1),
        vibe_score: 100,
        description: "Building the future of software together",
        age_secs: 10_000,
        stage: AppStage::Building,
    },
    Seed {
        id: "6",
        name: "Global Mesh",
        link: "#",
        author: "Net_Runner",
        likes: 5600,
        contributors: None,
        user_count: Some(45_000),
        vibe_score: 91,
        description: "Planetary scale distinct decentralized internet.",
        age_secs: 12_000,
        stage: AppStage::Scaling,
    },
    Seed {
        id: "7",
        name: "Data Ocean",
        link: "#",
        author: "Deep_Dive",
        likes: 3400,
        contributors: None,
        user_count: Some(12_000),
        vibe_score: 85,
        description: "Infinite storage for the collective consciousness.",
        age_secs: 9_000,
        stage: AppStage::Scaling,
    },
];

impl Catalog {
    /// Catalog holding the showcase apps
    pub fn seeded() -> Self {
        let now = Utc::now();
        let entries = SEEDS
            .iter()
            .map(|s| AppEntry {
                id: s.id.to_string(),
                name: s.name.to_string(),
                link: s.link.to_string(),
                author: s.author.to_string(),
                likes: s.likes,
                contributors: s.contributors,
                user_count: s.user_count,
                vibe_score: s.vibe_score,
                description: s.description.to_string(),
                timestamp: now - Duration::seconds(s.age_secs),
                stage: s.stage,
            })
            .collect();
        Self { entries }
    }

    /// Prepend a newly submitted entry; submissions always enter as Vibe
    pub fn add(&mut self, mut entry: AppEntry) {
        entry.stage = AppStage::Vibe;
        self.entries.insert(0, entry);
    }

    /// All entries, newest submission first
    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }

    /// Entries in one stage, in catalog order
    pub fn by_stage(&self, stage: AppStage) -> impl Iterator<Item = &AppEntry> {
        self.entries.iter().filter(move |e| e.stage == stage)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
