//! Fixed literal records standing in for data a backend would provide.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

/// Greeting shown as the first assistant message of every session
pub const GREETING: &str = "Hello! I'm your AI assistant. I can help you with questions about your PDF documents, company information, and general tasks. How can I assist you today?";

/// The one reply the assistant ever gives
pub const CANNED_REPLY: &str = "I understand your question. Based on the documents and company information available in the sidebar, I can help you analyze and provide insights. What specific aspect would you like me to focus on?";

/// Titles of past conversations listed in the sidebar
pub const CONVERSATIONS: [&str; 8] = [
    "Drug interaction analysis for elderly patients",
    "Clinical trial data interpretation",
    "Pharmaceutical regulatory compliance review",
    "Healthcare cost reduction strategies",
    "Medical device safety protocols",
    "Patient data privacy regulations",
    "Biomarker research methodology",
    "Telemedicine implementation best practices",
];

/// A PDF document shown in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PdfFile {
    pub id: u32,
    pub name: &'static str,
    /// Human-readable size label, e.g. "2.3 MB"
    pub size: &'static str,
    /// Relative time label, e.g. "2 days ago"
    pub last_modified: &'static str,
}

impl PdfFile {
    /// Secondary line shown under the file name
    pub fn detail(&self) -> String {
        format!("{} • {}", self.size, self.last_modified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Inactive,
}

/// A company shown in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: u32,
    pub name: &'static str,
    pub industry: &'static str,
    pub status: CompanyStatus,
}

pub const PDF_FILES: [PdfFile; 6] = [
    PdfFile { id: 1, name: "Annual_Report_2024.pdf", size: "2.3 MB", last_modified: "2 days ago" },
    PdfFile { id: 2, name: "Product_Specifications.pdf", size: "1.8 MB", last_modified: "1 week ago" },
    PdfFile { id: 3, name: "User_Manual_v2.pdf", size: "4.1 MB", last_modified: "3 days ago" },
    PdfFile { id: 4, name: "Financial_Statement.pdf", size: "1.2 MB", last_modified: "5 days ago" },
    PdfFile { id: 5, name: "Marketing_Strategy.pdf", size: "3.7 MB", last_modified: "1 week ago" },
    PdfFile { id: 6, name: "Technical_Documentation.pdf", size: "5.2 MB", last_modified: "4 days ago" },
];

pub const COMPANIES: [Company; 8] = [
    Company { id: 1, name: "Apple Inc.", industry: "Technology", status: CompanyStatus::Active },
    Company { id: 2, name: "Microsoft Corporation", industry: "Software", status: CompanyStatus::Active },
    Company { id: 3, name: "Google LLC", industry: "Technology", status: CompanyStatus::Active },
    Company { id: 4, name: "Amazon.com Inc.", industry: "E-commerce", status: CompanyStatus::Active },
    Company { id: 5, name: "Tesla Inc.", industry: "Automotive", status: CompanyStatus::Active },
    Company { id: 6, name: "Meta Platforms", industry: "Social Media", status: CompanyStatus::Active },
    Company { id: 7, name: "Netflix Inc.", industry: "Entertainment", status: CompanyStatus::Active },
    Company { id: 8, name: "Spotify AB", industry: "Music Streaming", status: CompanyStatus::Active },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn ids_are_unique_and_ordered() {
        assert!(PDF_FILES.windows(2).all(|w| w[0].id < w[1].id));
        assert!(COMPANIES.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn pdf_detail_joins_size_and_age() {
        assert_eq!(PDF_FILES[0].detail(), "2.3 MB • 2 days ago");
    }

    #[test]
    fn company_status_uses_lowercase_labels() {
        assert_eq!(CompanyStatus::Active.to_string(), "active");
        assert_eq!(CompanyStatus::from_str("inactive").unwrap(), CompanyStatus::Inactive);

        let json = serde_json::to_value(COMPANIES[0]).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["name"], "Apple Inc.");
    }
}
