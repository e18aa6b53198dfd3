/// Top-level grouping for documents. Declaration order is the index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Meta,
    Strategy,
    Roadmaps,
    Product,
    Platform,
    Ops,
    Status,
    Archive,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Meta,
        Self::Strategy,
        Self::Roadmaps,
        Self::Product,
        Self::Platform,
        Self::Ops,
        Self::Status,
        Self::Archive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meta => "00-meta",
            Self::Strategy => "10-strategy",
            Self::Roadmaps => "20-roadmaps",
            Self::Product => "30-product",
            Self::Platform => "40-platform",
            Self::Ops => "50-ops",
            Self::Status => "60-status",
            Self::Archive => "90-archive",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Meta => "Meta & Guidelines",
            Self::Strategy => "Strategy",
            Self::Roadmaps => "Roadmaps",
            Self::Product => "Product & Experience",
            Self::Platform => "Platform & Integrations",
            Self::Ops => "Operations & Runbooks",
            Self::Status => "Status Tracking",
            Self::Archive => "Archive",
        }
    }

    /// Exact match against the catalog spelling; no trimming or case folding.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Longterm,
    Status,
    Archive,
    Reference,
}

impl Lifecycle {
    pub const ALL: [Lifecycle; 4] = [
        Self::Longterm,
        Self::Status,
        Self::Archive,
        Self::Reference,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Longterm => "longterm",
            Self::Status => "status",
            Self::Archive => "archive",
            Self::Reference => "reference",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == raw)
    }
}
