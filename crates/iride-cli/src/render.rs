//! Markdown exports of a finished report: a technical audit for the
//! webmaster and a plain-language strategy document for the client.

use std::fmt::{self, Write as _};

use chrono::NaiveDate;
use iride_core::insights::{
    anchor_percentage_total, format_compact, has_manipulation_risk, has_strong_authority,
    rank_change, trust_gap,
};
use iride_core::{ActionItem, Keyword, SeoReport};

const BRAND: &str = "IrideSEOArchitect";

/// Which document to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Audience {
    /// Full technical audit
    Technical,
    /// Client-facing growth strategy
    Client,
}

impl Audience {
    /// Default export file name for a document generated on `date`.
    #[must_use]
    pub fn file_name(self, date: NaiveDate, extension: &str) -> String {
        let stem = match self {
            Audience::Technical => "Iride_Audit_Tecnico",
            Audience::Client => "Iride_Strategia_Cliente",
        };
        format!("{stem}_{}.{extension}", date.format("%Y-%m-%d"))
    }
}

#[must_use]
pub fn render(report: &SeoReport, audience: Audience, date: NaiveDate) -> String {
    match audience {
        Audience::Technical => render_technical(report, date),
        Audience::Client => render_client(report, date),
    }
}

/// Technical audit: metrics, summary, striking-distance table, operational
/// strategy and the supporting data sections.
#[must_use]
pub fn render_technical(report: &SeoReport, date: NaiveDate) -> String {
    let mut out = String::new();
    // Writing into a String is infallible.
    let _ = write_technical(&mut out, report, date);
    out
}

fn write_technical(out: &mut String, report: &SeoReport, date: NaiveDate) -> fmt::Result {
    writeln!(out, "# {BRAND}")?;
    writeln!(out)?;
    writeln!(out, "**Audit Tecnico Avanzato**: {}", report.url)?;
    writeln!(out, "**Data**: {}", date.format("%d/%m/%Y"))?;
    writeln!(out)?;

    writeln!(out, "## Metriche di Autorità")?;
    writeln!(out)?;
    writeln!(out, "| Metrica | Valore |")?;
    writeln!(out, "|---------|--------|")?;
    writeln!(out, "| Zoom Authority | {}/100 |", report.zoom_authority)?;
    writeln!(out, "| Zoom Trust | {}/100 |", report.zoom_trust)?;
    writeln!(out, "| Backlinks | {} |", format_compact(report.backlinks_count))?;
    writeln!(out, "| Ref. Domains | {} |", format_compact(report.referring_domains))?;
    writeln!(
        out,
        "| Opportunità (Striking Distance) | {} |",
        report.opportunity_keywords.len()
    )?;
    writeln!(out)?;
    if has_manipulation_risk(report) {
        writeln!(
            out,
            "> **Rischio penalizzazione**: il Trust è inferiore all'Authority di {} punti.",
            trust_gap(report)
        )?;
    } else {
        writeln!(out, "> Profilo di fiducia sano: il Trust tiene il passo dell'Authority.")?;
    }
    if has_strong_authority(report) {
        writeln!(out, ">")?;
        writeln!(out, "> Dominio con autorità elevata.")?;
    }
    writeln!(out)?;

    writeln!(out, "## Analisi Tecnica")?;
    writeln!(out)?;
    writeln!(out, "{}", report.summary.trim())?;
    writeln!(out)?;

    writeln!(out, "## Opportunità 'Striking Distance' (Pagina 2 → 1)")?;
    writeln!(out)?;
    if report.opportunity_keywords.is_empty() {
        writeln!(out, "_Nessuna keyword in seconda o terza pagina._")?;
    } else {
        writeln!(out, "| Keyword | Pos. Attuale | Volume | Potenziale | Trend |")?;
        writeln!(out, "|---------|--------------|--------|------------|-------|")?;
        for k in &report.opportunity_keywords {
            let potential = k.potential.map_or_else(|| "-".to_string(), |p| p.to_string());
            writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                cell(&k.term),
                k.current_rank,
                cell(&k.volume),
                potential,
                trend(k)
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "## Strategia Operativa")?;
    writeln!(out)?;
    writeln!(out, "| Area | Impatto | Sforzo | Azione |")?;
    writeln!(out, "|------|---------|--------|--------|")?;
    for r in prioritized(&report.recommendations) {
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            r.category,
            r.impact,
            r.effort,
            cell(&r.title)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Top Keyword")?;
    writeln!(out)?;
    writeln!(out, "| Keyword | Posizione | Volume | Difficoltà | Trend |")?;
    writeln!(out, "|---------|-----------|--------|------------|-------|")?;
    for k in &report.top_keywords {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            cell(&k.term),
            k.current_rank,
            cell(&k.volume),
            k.difficulty,
            trend(k)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Profilo Anchor Text")?;
    writeln!(out)?;
    writeln!(out, "| Tipo | % | Esempio |")?;
    writeln!(out, "|------|---|---------|")?;
    for a in &report.anchor_profile {
        writeln!(out, "| {} | {}% | {} |", a.kind, a.percentage, cell(&a.example))?;
    }
    let total = anchor_percentage_total(report);
    if total != 100 && !report.anchor_profile.is_empty() {
        writeln!(out)?;
        writeln!(out, "_Le percentuali riportate sommano a {total}%._")?;
    }
    writeln!(out)?;

    if !report.competitors.is_empty() {
        writeln!(out, "## Competitor Organici")?;
        writeln!(out)?;
        writeln!(out, "| Competitor | URL | Overlap | Keyword in comune |")?;
        writeln!(out, "|------------|-----|---------|-------------------|")?;
        for c in &report.competitors {
            writeln!(
                out,
                "| {} | {} | {}% | {} |",
                cell(&c.name),
                cell(&c.url),
                c.overlap_score,
                format_compact(c.common_keywords)
            )?;
        }
        writeln!(out)?;
    }

    if !report.traffic_trend.is_empty() {
        writeln!(out, "## Trend Traffico (12 mesi)")?;
        writeln!(out)?;
        writeln!(out, "| Mese | Visite |")?;
        writeln!(out, "|------|--------|")?;
        for p in &report.traffic_trend {
            writeln!(out, "| {} | {} |", cell(&p.month), format_compact(p.visits))?;
        }
        writeln!(out)?;
    }

    if !report.sources.is_empty() {
        writeln!(out, "## Fonti")?;
        writeln!(out)?;
        for s in &report.sources {
            writeln!(out, "- [{}]({})", s.title, s.uri)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Client document: the business summary and the actions in priority order,
/// without technical metrics.
#[must_use]
pub fn render_client(report: &SeoReport, date: NaiveDate) -> String {
    let mut out = String::new();
    let _ = write_client(&mut out, report, date);
    out
}

fn write_client(out: &mut String, report: &SeoReport, date: NaiveDate) -> fmt::Result {
    writeln!(out, "# Strategia di Crescita")?;
    writeln!(out)?;
    writeln!(out, "**{}** · {}", report.url, date.format("%d/%m/%Y"))?;
    writeln!(out)?;
    writeln!(out, "## La Situazione Attuale")?;
    writeln!(out)?;
    writeln!(out, "{}", report.client_summary.trim())?;
    writeln!(out)?;

    if !report.recommendations.is_empty() {
        writeln!(out, "## I Prossimi Passi")?;
        writeln!(out)?;
        for (i, r) in prioritized(&report.recommendations).into_iter().enumerate() {
            writeln!(out, "{}. **{}** ({}): {}", i + 1, r.title, r.impact, r.description)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "---")?;
    writeln!(out, "_{BRAND}_")
}

/// Recommendations by impact, most critical first; ties keep model order.
fn prioritized(items: &[ActionItem]) -> Vec<&ActionItem> {
    let mut sorted: Vec<&ActionItem> = items.iter().collect();
    sorted.sort_by_key(|r| r.impact);
    sorted
}

fn trend(keyword: &Keyword) -> String {
    match rank_change(keyword) {
        Some(delta) if delta > 0 => format!("▲ {delta}"),
        Some(delta) if delta < 0 => format!("▼ {}", delta.unsigned_abs()),
        Some(_) => "=".to_string(),
        None => "-".to_string(),
    }
}

/// Escapes pipes so model text cannot break a table row.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
