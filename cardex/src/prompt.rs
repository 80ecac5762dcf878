//! The fixed extraction prompt.
//!
//! The prompt is static: nothing about it is parameterized per request.

/// Field names the model is asked to populate, in prompt order.
pub const FIELD_NAMES: &[&str] = &[
    "book_number",
    "registration_number",
    "name",
    "age",
    "date_of_birth",
    "sex",
    "caste",
    "mobile_number",
    "aadhar_number",
    "address",
    "date_of_admission",
    "mother's_name",
    "relatives",
    "blood_group",
    "leprosy_type",
    "mdt_status",
    "deformity_status",
    "duration_of_disease",
    "previous_occupation",
];

/// Values the prompt allows for `leprosy_type`.
pub const LEPROSY_TYPES: &[&str] = &["MB", "PB"];

/// Values the prompt allows for `mdt_status`.
pub const MDT_STATUSES: &[&str] = &["Cured", "Under MDT", "Unknown"];

/// Instruction text sent ahead of the card image.
pub const EXTRACTION_PROMPT: &str = r#"
You are an intelligent assistant tasked with extracting structured information from a patient's treatment card image issued by SITA RATAN LEPROSY HOSPITAL, ANANDWAN.

1. Use OCR to read printed text from the image.
2. Extract the data into JSON format with the following keys:
- book_number
- registration_number
- name
- age
- date_of_birth
- sex
- caste
- mobile_number
- aadhar_number
- address
- date_of_admission
- mother's_name
- relatives
- blood_group
- leprosy_type (either "MB" or "PB")
- mdt_status (either "Cured", "Under MDT", or "Unknown")
- deformity_status
- duration_of_disease
- previous_occupation

3. If any field is empty or not visible in the image, assign its value as `null`.
4. For multi-line fields like address or relatives, combine the lines into a single string.
5. Return the final response in a clean JSON format only, with no extra commentary.

Handle spelling inconsistencies (e.g., "pervious" should be treated as "previous") and include them correctly in the JSON output.
"#;
