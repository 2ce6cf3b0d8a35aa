//! Prompts and response schemas for the two generation requests.
//!
//! The schemas use the generation service's own schema dialect
//! (upper-case type names) and are sent alongside the prompt so the
//! service returns structured JSON.

use serde_json::{json, Value};

use onco_planner_core::models::{ClinicalMarkers, Patient, TreatmentOption};

/// Prompt for high-level pathway generation.
pub fn pathway_prompt(patient: &Patient, markers: &ClinicalMarkers) -> String {
    format!(
        r#"作为乳腺外科专家，制定2-3种总体治疗路径。
患者: {}岁, {}, 分子分型:{}
病理: ER:{}, PR:{}, HER2:{}, Ki67:{}, T:{}, N:{}, 绝经:{}

返回JSON数组，每个包含: id, title, iconType(surgery/chemo/drug/observation), description, duration, pros[], cons[], recommended(boolean).
依据NCCN/CSCO指南标记最推荐方案。"#,
        patient.age,
        patient.diagnosis,
        patient.subtype,
        markers.er_status,
        markers.pr_status,
        markers.her2_status,
        markers.ki67,
        markers.tumor_size,
        markers.node_status,
        if markers.menopause { "是" } else { "否" },
    )
}

/// Prompt for detailed regimen generation under a chosen pathway.
pub fn regimen_prompt(patient: &Patient, chosen: &TreatmentOption) -> String {
    format!(
        r#"基于路径 "{}"，提供详细药物方案。
患者: {}岁, 分型:{}
返回JSON对象包含: chemoOptions, endocrineOptions, targetOptions, immuneOptions.
每项需包含: drugs(name, standardDose, unit), totalCycles, frequencyDays.
单位使用: mg/m2, mg/kg, 或 mg."#,
        chosen.title, patient.age, patient.subtype,
    )
}

/// Response schema for pathway generation: an array of options.
pub fn pathway_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "iconType": { "type": "STRING", "enum": ["surgery", "chemo", "drug", "observation"] },
                "description": { "type": "STRING" },
                "duration": { "type": "STRING" },
                "pros": { "type": "ARRAY", "items": { "type": "STRING" } },
                "cons": { "type": "ARRAY", "items": { "type": "STRING" } },
                "recommended": { "type": "BOOLEAN" }
            },
            "required": ["id", "title", "iconType", "description", "recommended"]
        }
    })
}

/// Response schema for regimen generation: four per-category arrays.
pub fn regimen_schema() -> Value {
    let drug_schema = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "standardDose": { "type": "NUMBER" },
                "unit": { "type": "STRING" }
            },
            "required": ["name", "standardDose", "unit"]
        }
    });

    let regimen_list = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "name": { "type": "STRING" },
                "description": { "type": "STRING" },
                "cycle": { "type": "STRING" },
                "type": { "type": "STRING" },
                "recommended": { "type": "BOOLEAN" },
                "drugs": drug_schema,
                "totalCycles": { "type": "INTEGER" },
                "frequencyDays": { "type": "INTEGER" }
            },
            "required": ["id", "name", "description", "type", "recommended"]
        }
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "chemoOptions": regimen_list,
            "endocrineOptions": regimen_list,
            "targetOptions": regimen_list,
            "immuneOptions": regimen_list
        },
        "required": ["chemoOptions", "endocrineOptions", "targetOptions", "immuneOptions"]
    })
}
