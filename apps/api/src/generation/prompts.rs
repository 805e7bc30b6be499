// All LLM prompt constants for the Generation module.
// The drafting call sends DRAFT_SYSTEM as the system instruction and wraps
// the assembled brief with DRAFT_PROMPT_PREFIX.

/// System instruction for document drafting. Fixes the house style
/// ("short, practical, innovative") and the GB/T 9704-2012 technical
/// standard, and pins the JSON output contract.
pub const DRAFT_SYSTEM: &str = r#"你是一个顶尖的公文写作专家，致力于推广“短、实、新”的优良文风。

核心写作要求：
1. **短（Concise）**：力戒长篇大论，开门见山，直奔主题。删减空话、套话，每句话都要有信息量。
2. **实（Practical）**：内容务实，措施具体，数据真实。重点放在解决什么问题、怎么解决问题上。
3. **新（Innovative）**：观点新颖，表达生动。在符合公文规范的前提下，尽量避免陈词滥调，体现新时代的工作思路。

技术标准：
- 严格执行《党政机关公文格式》（GB/T 9704-2012）。
- **标题**：发文机关+事由+文种，二号小标宋。
- **正文**：三号仿宋，28磅行间距感。
- **序号层级**：一、/（一）/1./（1）。
- **参考文件利用**：若提供了参考文件，请精准提取核心精神或数据，并有机融入新公文中，而非简单堆砌。

输出必须是JSON格式：
- title: 标题
- recipient: 主送机关（若无则为空）
- body: 正文（重点体现“短实新”，结构严密）
- sender: 发文单位
- date: 成文日期（中文数字格式，如：二〇二五年三月十日）
- attachments: 附件列表（数组）"#;

/// Fixed prefix placed before the assembled brief in the user prompt.
pub const DRAFT_PROMPT_PREFIX: &str = "请根据以下结构化要素和要求生成公文：";

/// Structured-output schema for the drafting call. Matches the fields of
/// `OfficialDocument`; recipient and attachments stay optional.
pub fn document_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "recipient": { "type": "STRING" },
            "body": { "type": "STRING" },
            "sender": { "type": "STRING" },
            "date": { "type": "STRING" },
            "attachments": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["title", "body", "sender", "date"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_schema_requires_core_fields() {
        let schema = document_response_schema();
        let required = schema["required"]
            .as_array()
            .expect("schema should list required fields");
        let names: Vec<&str> = required.iter().filter_map(|v| v.as_str()).collect();
        assert_eq!(names, vec!["title", "body", "sender", "date"]);

        // recipient and attachments are described but not required
        assert!(schema["properties"]["recipient"].is_object());
        assert!(schema["properties"]["attachments"]["items"].is_object());
        assert!(!names.contains(&"recipient"));
        assert!(!names.contains(&"attachments"));
    }

    #[test]
    fn test_system_prompt_pins_output_contract() {
        assert!(DRAFT_SYSTEM.contains("GB/T 9704-2012"));
        assert!(DRAFT_SYSTEM.contains("输出必须是JSON格式"));
        assert!(DRAFT_PROMPT_PREFIX.ends_with('：'));
    }
}
