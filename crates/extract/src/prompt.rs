use graph::mode::ExtractionMode;

/// Mode-specific prompt over the document text. The exact wording is a
/// tuning parameter; the response shape each template demands is the
/// contract the validator enforces.
pub fn build_prompt(mode: ExtractionMode, document_text: &str, max_terms: usize) -> String {
    match mode {
        ExtractionMode::ConceptList => concept_list_prompt(document_text, max_terms),
        ExtractionMode::HierarchyTree => hierarchy_tree_prompt(document_text),
        ExtractionMode::ArgumentTree => argument_tree_prompt(document_text),
        ExtractionMode::EntityGraph => entity_graph_prompt(document_text),
        ExtractionMode::StakeholderGraph => stakeholder_graph_prompt(document_text),
    }
}

fn concept_list_prompt(document_text: &str, max_terms: usize) -> String {
    format!(
        r#"Extract up to {max_terms} of the most important concepts, technical terms, or keywords from the following document, prioritizing those that are central to its arguments, themes, or subject matter. For each term, provide a clear and concise one-sentence explanation suitable as a tooltip for a mindmap node.

Return as a JSON array:
[
  {{"term": "Concept 1", "tooltip": "Short definition or explanation."}},
  ...
]
Only return valid JSON; do not include commentary, explanation, or text before or after the JSON.

Document:
---
{document_text}"#
    )
}

fn hierarchy_tree_prompt(document_text: &str) -> String {
    format!(
        r#"Summarize the structure of this document as a hierarchical mindmap. Your mindmap should have:
- 3 to 6 major topics at the first level (root children).
- 2 to 4 subtopics or key points for each topic (second level).
- (Optional) A third level for important supporting details, but only if clearly warranted by the document.
Each node must have a "name" (the topic/idea) and a "tooltip" (a brief description or summary of its meaning or role in the document).

Return as valid JSON in the following format:
{{
  "name": "Short title of the document",
  "tooltip": "Concise summary of the overall subject",
  "children": [
    {{
      "name": "Main Topic 1",
      "tooltip": "...",
      "children": [
        {{"name": "Subtopic A", "tooltip": "..."}},
        {{"name": "Subtopic B", "tooltip": "..."}}
      ]
    }},
    ...
  ]
}}

Only output the JSON. Do not include any commentary or additional explanation.

Document:
---
{document_text}"#
    )
}

fn argument_tree_prompt(document_text: &str) -> String {
    format!(
        r#"Extract the main argument structure from the following document and represent it as a hierarchical mindmap. Your output should have:
- A root node stating the main thesis or central claim of the document.
- For each main argument or reason supporting the thesis, create a first-level child node with a concise summary.
- For each main argument, include its key supporting evidence, examples, or sub-reasons as further children (second or third level as needed).
- If there are notable counterarguments or objections addressed in the document, add them as sibling branches.

Each node must have:
- "name": the claim, argument, evidence, or objection (short phrase)
- "tooltip": a brief summary, example, or citation (1-2 sentences)
- "type": one of "Thesis", "Supporting Argument", "Evidence", "Counterargument"

Return valid JSON only, in this format:
{{
  "name": "Thesis: ...",
  "tooltip": "...",
  "type": "Thesis",
  "children": [
    {{
      "name": "Main Argument 1",
      "tooltip": "...",
      "type": "Supporting Argument",
      "children": [
        {{ "name": "Evidence", "tooltip": "...", "type": "Evidence" }}
      ]
    }},
    {{
      "name": "Counterargument: ...",
      "tooltip": "...",
      "type": "Counterargument",
      "children": [
        {{ "name": "Rebuttal", "tooltip": "...", "type": "Supporting Argument" }}
      ]
    }}
  ]
}}
Only output valid JSON, no commentary.

Document:
---
{document_text}"#
    )
}

fn entity_graph_prompt(document_text: &str) -> String {
    format!(
        r#"Extract the key entities and their relationships from the following document.

INSTRUCTIONS:
1. Identify key entities (people, organizations, concepts, technologies, locations, events)
2. Extract relationships between entities
3. Output ONLY valid JSON, nothing else

SCHEMA:
{{
  "nodes": [
    {{"id": "Entity name", "type": "PERSON|ORGANIZATION|CONCEPT|TECHNOLOGY|LOCATION|EVENT", "description": "brief description"}}
  ],
  "edges": [
    {{"source": "Entity name", "target": "Other entity name", "relationship": "relationship_type"}}
  ]
}}

RULES:
- Use the entity's display name as its "id"; every edge's "source" and "target" must exactly match a node "id"
- Entity types must be one of: PERSON, ORGANIZATION, CONCEPT, TECHNOLOGY, LOCATION, EVENT
- Relationship types should be verbs: "creates", "uses", "affects", "manages", "contains", etc.
- Extract 3-12 entities and 2-10 relationships
- Output ONLY the JSON object, no markdown, no explanations

Document:
---
{document_text}"#
    )
}

fn stakeholder_graph_prompt(document_text: &str) -> String {
    format!(
        r#"Identify the stakeholders discussed or implied in the following document and how they relate to each other.

Output ONLY valid JSON with this schema:
{{
  "nodes": [
    {{"id": "Stakeholder name", "role": "Decision Maker|Primary|Secondary|Influencer|Affected Party", "description": "their stake in one sentence"}}
  ],
  "edges": [
    {{"source": "Stakeholder name", "target": "Other stakeholder name", "relationship": "how they interact"}}
  ]
}}

RULES:
- Use the stakeholder's display name as its "id"; every edge endpoint must exactly match a node "id"
- Extract 3-10 stakeholders and the relationships the document supports
- Output ONLY the JSON object, no markdown, no explanations

Document:
---
{document_text}"#
    )
}

/// Prompt for the short root-node title, built over the leading chunk of
/// the document.
pub fn build_title_prompt(chunk: &str, max_words: usize) -> String {
    format!(
        "Based on the following text, summarize the main topic or theme in a short, clear phrase suitable as the root node of a mindmap. Use no more than {max_words} words.\n\nText:\n{chunk}"
    )
}
