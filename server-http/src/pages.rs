use newsroom::planes::control::SecretKeyForm;

pub const SUBMITTED_SELECTOR: &str = "#submitted";

pub fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// The admin settings page. Submission goes through `fetch` and the
/// returned commands are applied in place, without a page reload.
pub fn settings_page(action: &str, form: &SecretKeyForm) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>News API settings</title>
</head>
<body>
<form id="news-api-config-page" method="post" action="{action}">
  <label for="edit-secret-key">Secret Key</label>
  <input type="text" id="edit-secret-key" name="secret_key" value="{value}" required>
  <div class="description">Enter The Secret Key</div>
  <div id="full-name-result" class="red"></div>
  <button type="submit">Submit</button>
  <div id="submitted"></div>
</form>
<script>
document.getElementById("news-api-config-page").addEventListener("submit", async (event) => {{
  event.preventDefault();
  const form = event.target;
  const response = await fetch(form.action, {{
    method: "POST",
    headers: {{ "Content-Type": "application/x-www-form-urlencoded" }},
    body: new URLSearchParams(new FormData(form)),
  }});
  const payload = await response.json();
  if (!response.ok) {{
    document.getElementById("full-name-result").textContent = payload.error;
    return;
  }}
  document.getElementById("full-name-result").textContent = "";
  for (const command of payload) {{
    if (command.command === "insert" && command.method === "html") {{
      document.querySelector(command.selector).innerHTML = command.data;
    }}
  }}
}});
</script>
</body>
</html>
"#,
        action = html_escape(action),
        value = html_escape(&form.secret_key),
    )
}
