//! URLs of the server endpoints and pages the widgets talk to.

/// Extract the project id from a page path such as `/projects/42/consumo/`.
///
/// Only a purely numeric segment directly after `projects` is accepted.
pub fn project_id_from_path(path: &str) -> Option<String> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment == "projects" {
            return segments
                .next()
                .filter(|id| id.chars().all(|c| c.is_ascii_digit()))
                .map(str::to_string);
        }
    }
    None
}

/// Month-scoped consumption summary endpoint
pub fn month_consumptions_url(base_url: &str, project_id: &str, month: u32, year: i32) -> String {
    format!(
        "{}/projects/{}/consumo/api/mes/?mes={}&anio={}",
        base_url.trim_end_matches('/'),
        project_id,
        month,
        year
    )
}

/// Page for registering a consumption on a given date
pub fn register_consumption_url(project_id: &str, date_key: &str) -> String {
    format!("/projects/{}/consumo/registrar/?fecha={}", project_id, date_key)
}

/// Page listing the consumptions of a single date
pub fn list_consumptions_url(project_id: &str, date_key: &str) -> String {
    format!(
        "/projects/{}/consumo/listar/?fecha_desde={}&fecha_hasta={}",
        project_id, date_key, date_key
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_from_path() {
        assert_eq!(project_id_from_path("/projects/42/consumo/"), Some("42".to_string()));
        assert_eq!(project_id_from_path("/projects/7"), Some("7".to_string()));
        assert_eq!(project_id_from_path("/es/projects/15/detail/"), Some("15".to_string()));

        // Missing or non-numeric ids
        assert_eq!(project_id_from_path("/projects/"), None);
        assert_eq!(project_id_from_path("/projects/new/"), None);
        assert_eq!(project_id_from_path("/dashboard/"), None);
        assert_eq!(project_id_from_path(""), None);
    }

    #[test]
    fn test_month_url() {
        assert_eq!(
            month_consumptions_url("", "3", 2, 2026),
            "/projects/3/consumo/api/mes/?mes=2&anio=2026"
        );
        assert_eq!(
            month_consumptions_url("https://obra.example.com/", "3", 12, 2025),
            "https://obra.example.com/projects/3/consumo/api/mes/?mes=12&anio=2025"
        );
    }

    #[test]
    fn test_page_links() {
        assert_eq!(
            register_consumption_url("9", "2026-10-19"),
            "/projects/9/consumo/registrar/?fecha=2026-10-19"
        );
        assert_eq!(
            list_consumptions_url("9", "2026-10-19"),
            "/projects/9/consumo/listar/?fecha_desde=2026-10-19&fecha_hasta=2026-10-19"
        );
    }
}
