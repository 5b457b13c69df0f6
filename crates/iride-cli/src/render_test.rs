use iride_core::{
    ActionCategory, ActionItem, AnchorShare, AnchorType, Competitor, Effort, Impact, Keyword,
    Potential, SeoReport, Source, TrafficPoint,
};

use super::*;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("date")
}

fn action(title: &str, impact: Impact) -> ActionItem {
    ActionItem {
        title: title.to_string(),
        description: format!("Descrizione di {title}"),
        impact,
        effort: Effort::Medio,
        category: ActionCategory::ContentGap,
    }
}

fn report() -> SeoReport {
    SeoReport {
        url: "https://mysite.it".to_string(),
        summary: "Struttura tecnica solida.".to_string(),
        client_summary: "Il sito è ben visibile in città.".to_string(),
        zoom_authority: 42,
        zoom_trust: 35,
        backlinks_count: 5_400,
        referring_domains: 210,
        anchor_profile: vec![
            AnchorShare {
                kind: AnchorType::Brand,
                percentage: 60,
                example: "mysite".to_string(),
            },
            AnchorShare {
                kind: AnchorType::ExactMatch,
                percentage: 30,
                example: "gioielli | verona".to_string(),
            },
        ],
        traffic_trend: vec![TrafficPoint {
            month: "ott 2026".to_string(),
            visits: 1_500,
        }],
        top_keywords: vec![Keyword {
            term: "gioielleria verona".to_string(),
            volume: "880".to_string(),
            difficulty: 38,
            current_rank: 3,
            rank_history: vec![7, 5, 3],
            potential: None,
        }],
        opportunity_keywords: vec![Keyword {
            term: "orologi verona".to_string(),
            volume: "250".to_string(),
            difficulty: 27,
            current_rank: 14,
            rank_history: vec![12, 14],
            potential: Some(Potential::Alto),
        }],
        competitors: vec![Competitor {
            name: "Sorelle Ronco".to_string(),
            url: "https://sorelleronco.it".to_string(),
            overlap_score: 64,
            common_keywords: 1_200,
        }],
        recommendations: vec![
            action("Ottimizzare immagini", Impact::Medio),
            action("Pagine città", Impact::Critico),
            action("Link building locale", Impact::Alto),
        ],
        sources: vec![Source {
            title: "a.example".to_string(),
            uri: "https://a.example/1".to_string(),
        }],
    }
}

#[test]
fn file_names_follow_export_convention() {
    assert_eq!(
        Audience::Technical.file_name(date(), "md"),
        "Iride_Audit_Tecnico_2026-10-18.md"
    );
    assert_eq!(
        Audience::Client.file_name(date(), "json"),
        "Iride_Strategia_Cliente_2026-10-18.json"
    );
}

#[test]
fn technical_audit_has_metrics_and_tables() {
    let doc = render_technical(&report(), date());

    assert!(doc.starts_with("# IrideSEOArchitect\n"));
    assert!(doc.contains("**Audit Tecnico Avanzato**: https://mysite.it"));
    assert!(doc.contains("| Zoom Authority | 42/100 |"));
    assert!(doc.contains("| Backlinks | 5.4k |"));
    assert!(doc.contains("| Opportunità (Striking Distance) | 1 |"));
    assert!(doc.contains("| Keyword | Pos. Attuale | Volume | Potenziale | Trend |"));
    assert!(doc.contains("| orologi verona | 14 | 250 | Alto | ▼ 2 |"));
    assert!(doc.contains("| gioielleria verona | 3 | 880 | 38 | ▲ 4 |"));
    assert!(doc.contains("- [a.example](https://a.example/1)"));
}

#[test]
fn technical_audit_flags_trust_below_authority() {
    let doc = render_technical(&report(), date());
    assert!(doc.contains("Rischio penalizzazione"));
    assert!(doc.contains("di 7 punti"));

    let mut healthy = report();
    healthy.zoom_trust = 60;
    let doc = render_technical(&healthy, date());
    assert!(!doc.contains("Rischio penalizzazione"));
}

#[test]
fn technical_audit_notes_anchor_totals_off_100() {
    let doc = render_technical(&report(), date());
    assert!(doc.contains("sommano a 90%"));
}

#[test]
fn table_cells_escape_pipes() {
    let doc = render_technical(&report(), date());
    assert!(doc.contains("gioielli \\| verona"));
}

#[test]
fn strategy_rows_are_ordered_by_impact() {
    let doc = render_technical(&report(), date());
    let critical = doc.find("| Critico |").expect("critical row");
    let high = doc.find("| Alto | Medio | Link building").expect("high row");
    let medium = doc.find("| Medio | Medio | Ottimizzare").expect("medium row");
    assert!(critical < high && high < medium);
}

#[test]
fn client_document_omits_technical_metrics() {
    let doc = render_client(&report(), date());

    assert!(doc.starts_with("# Strategia di Crescita\n"));
    assert!(doc.contains("Il sito è ben visibile in città."));
    assert!(doc.contains("1. **Pagine città** (Critico)"));
    assert!(doc.contains("3. **Ottimizzare immagini** (Medio)"));
    assert!(!doc.contains("Zoom Authority"));
    assert!(!doc.contains("Backlinks"));
}

#[test]
fn empty_opportunities_render_placeholder() {
    let mut r = report();
    r.opportunity_keywords.clear();
    let doc = render(&r, Audience::Technical, date());
    assert!(doc.contains("_Nessuna keyword in seconda o terza pagina._"));
}
