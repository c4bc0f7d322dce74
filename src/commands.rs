use crate::filter::filter_conversations;
use crate::mock_data::{Company, CompanyStatus, COMPANIES, CONVERSATIONS, PDF_FILES};
use crate::ui::sidebar::NO_RESULTS;
use anyhow::{Context, Result};
use std::io::Write;

/// Print conversation titles, filtered by `search` when given
pub fn list_conversations(out: &mut impl Write, search: Option<&str>, json: bool) -> Result<()> {
    let titles = filter_conversations(search.unwrap_or(""), &CONVERSATIONS);
    tracing::debug!(query = search.unwrap_or(""), matches = titles.len(), "listing conversations");

    if json {
        let content = serde_json::to_string_pretty(&titles)
            .context("Failed to serialize conversations")?;
        writeln!(out, "{}", content)?;
        return Ok(());
    }

    if titles.is_empty() {
        writeln!(out, "📭 {}", NO_RESULTS)?;
        return Ok(());
    }

    writeln!(out, "💬 Recent conversations:\n")?;
    for title in titles {
        writeln!(out, "  • {}", title)?;
    }
    Ok(())
}

/// Print the PDF documents
pub fn list_files(out: &mut impl Write, json: bool) -> Result<()> {
    if json {
        let content = serde_json::to_string_pretty(&PDF_FILES)
            .context("Failed to serialize files")?;
        writeln!(out, "{}", content)?;
        return Ok(());
    }

    writeln!(out, "📄 PDF documents:\n")?;
    for file in PDF_FILES.iter() {
        writeln!(out, "  • {}", file.name)?;
        writeln!(out, "    {}", file.detail())?;
    }
    Ok(())
}

/// Print the companies, only those with `status` when given
pub fn list_companies(out: &mut impl Write, status: Option<CompanyStatus>, json: bool) -> Result<()> {
    let companies: Vec<&Company> = COMPANIES
        .iter()
        .filter(|company| status.map_or(true, |status| company.status == status))
        .collect();

    if json {
        let content = serde_json::to_string_pretty(&companies)
            .context("Failed to serialize companies")?;
        writeln!(out, "{}", content)?;
        return Ok(());
    }

    if companies.is_empty() {
        let label = status.map(|status| status.to_string()).unwrap_or_default();
        writeln!(out, "📭 No {} companies", label)?;
        return Ok(());
    }

    writeln!(out, "🏢 Companies:\n")?;
    for company in companies {
        writeln!(out, "  • {} ({}, {})", company.name, company.industry, company.status)?;
    }
    Ok(())
}
