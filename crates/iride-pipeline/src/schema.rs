//! Response schema sent with the structured analysis request.
//!
//! Uses the OpenAPI subset accepted by Gemini (`OBJECT`, `ARRAY`, `STRING`,
//! `INTEGER`). Enum values are taken from the report types so the schema
//! and the decoder cannot drift apart.

use iride_core::{ActionCategory, AnchorType, Effort, Impact, Potential};
use serde_json::{json, Value};

use crate::temporal::TemporalContext;

/// Top-level report fields the model must always produce.
pub const REQUIRED_FIELDS: [&str; 13] = [
    "url",
    "summary",
    "clientSummary",
    "zoomAuthority",
    "zoomTrust",
    "backlinksCount",
    "referringDomains",
    "anchorProfile",
    "trafficTrend",
    "topKeywords",
    "opportunityKeywords",
    "competitors",
    "recommendations",
];

fn labels<T: Copy>(values: &[T], label: fn(T) -> &'static str) -> Vec<&'static str> {
    values.iter().map(|v| label(*v)).collect()
}

fn keyword_schema(description: &str, rank_hint: &str, with_potential: bool) -> Value {
    let mut properties = json!({
        "term": { "type": "STRING" },
        "volume": { "type": "STRING" },
        "difficulty": { "type": "INTEGER" },
        "currentRank": { "type": "INTEGER", "description": rank_hint },
        "rankHistory": { "type": "ARRAY", "items": { "type": "INTEGER" } }
    });
    if with_potential {
        properties["potential"] = json!({
            "type": "STRING",
            "enum": labels(&Potential::ALL, Potential::label)
        });
    }
    json!({
        "type": "ARRAY",
        "description": description,
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": ["term", "volume", "difficulty", "currentRank", "rankHistory"]
        }
    })
}

fn anchor_profile_schema() -> Value {
    json!({
        "type": "ARRAY",
        "description": "Distribuzione testi ancore",
        "items": {
            "type": "OBJECT",
            "properties": {
                "type": { "type": "STRING", "enum": labels(&AnchorType::ALL, AnchorType::label) },
                "percentage": { "type": "INTEGER" },
                "example": { "type": "STRING", "description": "Esempio reale di ancora trovata" }
            },
            "required": ["type", "percentage", "example"]
        }
    })
}

fn traffic_trend_schema(ctx: &TemporalContext) -> Value {
    let description = format!(
        "Trend visite 12 mesi ({} - {}).",
        ctx.year_ago_month_year(),
        ctx.current_month_year()
    );
    json!({
        "type": "ARRAY",
        "description": description,
        "items": {
            "type": "OBJECT",
            "properties": {
                "month": { "type": "STRING" },
                "visits": { "type": "INTEGER" }
            },
            "required": ["month", "visits"]
        }
    })
}

fn competitors_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "url": { "type": "STRING" },
                "overlapScore": { "type": "INTEGER" },
                "commonKeywords": { "type": "INTEGER" }
            },
            "required": ["name", "url", "overlapScore", "commonKeywords"]
        }
    })
}

fn recommendations_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "impact": { "type": "STRING", "enum": labels(&Impact::ALL, Impact::label) },
                "effort": { "type": "STRING", "enum": labels(&Effort::ALL, Effort::label) },
                "category": {
                    "type": "STRING",
                    "enum": labels(&ActionCategory::ALL, ActionCategory::label)
                }
            },
            "required": ["title", "description", "impact", "effort", "category"]
        }
    })
}

/// Builds the full report schema for the given date context.
#[must_use]
pub fn report_schema(ctx: &TemporalContext) -> Value {
    let properties = json!({
        "url": { "type": "STRING" },
        "summary": { "type": "STRING", "description": "Audit tecnico per webmaster." },
        "clientSummary": { "type": "STRING", "description": "Spiegazione business per il cliente." },
        "zoomAuthority": { "type": "INTEGER", "description": "Popolarità del dominio (0-100)." },
        "zoomTrust": { "type": "INTEGER", "description": "Fiducia del dominio (0-100)." },
        "backlinksCount": { "type": "INTEGER", "description": "Totale Backlink stimati." },
        "referringDomains": { "type": "INTEGER", "description": "Domini unici (RefDom)." },
        "anchorProfile": anchor_profile_schema(),
        "trafficTrend": traffic_trend_schema(ctx),
        "topKeywords": keyword_schema("Keyword Top 10", "1-10", false),
        "opportunityKeywords": keyword_schema("Keyword in 2a/3a Pagina (Pos 11-30).", "11-30", true),
        "competitors": competitors_schema(),
        "recommendations": recommendations_schema()
    });

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": REQUIRED_FIELDS
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn schema() -> Value {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("date");
        report_schema(&TemporalContext::new(today))
    }

    #[test]
    fn every_top_level_field_is_required_and_declared() {
        let schema = schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .expect("required array")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, REQUIRED_FIELDS);

        let properties = schema["properties"].as_object().expect("properties");
        assert_eq!(properties.len(), REQUIRED_FIELDS.len());
        for field in REQUIRED_FIELDS {
            assert!(properties.contains_key(field), "missing property {field}");
        }
        assert!(!properties.contains_key("sources"));
    }

    #[test]
    fn enums_match_wire_labels() {
        let schema = schema();
        let anchor_enum = &schema["properties"]["anchorProfile"]["items"]["properties"]["type"]["enum"];
        assert_eq!(*anchor_enum, json!(["Brand", "Exact Match", "Generic", "URL"]));

        let rec = &schema["properties"]["recommendations"]["items"]["properties"];
        assert_eq!(rec["impact"]["enum"], json!(["Critico", "Alto", "Medio"]));
        assert_eq!(rec["effort"]["enum"], json!(["Alto", "Medio", "Basso"]));
        assert_eq!(
            rec["category"]["enum"],
            json!(["Content Gap", "Anchor Strategy", "Tech Health", "Authority"])
        );
    }

    #[test]
    fn only_opportunity_keywords_carry_potential() {
        let schema = schema();
        let top = &schema["properties"]["topKeywords"]["items"]["properties"];
        let opp = &schema["properties"]["opportunityKeywords"]["items"]["properties"];
        assert!(top.get("potential").is_none());
        assert_eq!(opp["potential"]["enum"], json!(["Alto", "Medio", "Basso"]));
        assert_eq!(opp["currentRank"]["description"], "11-30");
    }

    #[test]
    fn traffic_trend_names_the_trailing_window() {
        let schema = schema();
        assert_eq!(
            schema["properties"]["trafficTrend"]["description"],
            "Trend visite 12 mesi (ottobre 2025 - ottobre 2026)."
        );
    }
}
