// src/services/export_service.rs

use crate::store::{CrmRepository, SaleRepository, VehicleRepository};

// Campo que contenha vírgula, aspas ou quebra de linha vai entre aspas
// duplas, com as aspas internas duplicadas (regra padrão de CSV).
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_document(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in rows {
        out.push_str(&csv_line(row));
        out.push('\n');
    }
    out
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// "Excel" de uma tela só: uma tabela HTML servida com content-type de
// planilha. Não existe caminho de importação de volta.
fn xls_document(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table>\n<tr>");
    for h in header {
        out.push_str(&format!("<th>{}</th>", html_escape(h)));
    }
    out.push_str("</tr>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", html_escape(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

#[derive(Clone)]
pub struct ExportService {
    vehicle_repo: VehicleRepository,
    sale_repo: SaleRepository,
    crm_repo: CrmRepository,
}

const VEHICLE_HEADER: [&str; 9] = [
    "placa",
    "marca",
    "modelo",
    "ano",
    "status",
    "preco_compra",
    "custo_contabil",
    "preco_venda",
    "km",
];

const SALE_HEADER: [&str; 7] = [
    "data",
    "status",
    "veiculo",
    "placa",
    "cliente",
    "valor",
    "lucro",
];

const CUSTOMER_HEADER: [&str; 4] = ["nome", "email", "telefone", "documento"];

impl ExportService {
    pub fn new(
        vehicle_repo: VehicleRepository,
        sale_repo: SaleRepository,
        crm_repo: CrmRepository,
    ) -> Self {
        Self {
            vehicle_repo,
            sale_repo,
            crm_repo,
        }
    }

    async fn vehicle_rows(&self) -> Vec<Vec<String>> {
        self.vehicle_repo
            .list()
            .await
            .iter()
            .map(|v| {
                vec![
                    v.specs.plate.clone(),
                    v.specs.brand.clone(),
                    v.specs.model.clone(),
                    v.specs.year.to_string(),
                    format!("{:?}", v.status).to_lowercase(),
                    v.purchase_price.to_string(),
                    v.cost_basis.to_string(),
                    v.selling_price.to_string(),
                    v.specs.mileage_km.to_string(),
                ]
            })
            .collect()
    }

    async fn sale_rows(&self) -> Vec<Vec<String>> {
        let vehicles = self.vehicle_repo.list().await;
        let customers = self.crm_repo.list_customers().await;

        self.sale_repo
            .list()
            .await
            .iter()
            .map(|s| {
                let vehicle = vehicles.iter().find(|v| v.id == s.vehicle_id);
                let customer = customers.iter().find(|c| c.id == s.customer_id);
                vec![
                    s.sale_date.to_string(),
                    format!("{:?}", s.status).to_lowercase(),
                    vehicle
                        .map(|v| format!("{} {}", v.specs.brand, v.specs.model))
                        .unwrap_or_default(),
                    vehicle.map(|v| v.specs.plate.clone()).unwrap_or_default(),
                    customer.map(|c| c.full_name.clone()).unwrap_or_default(),
                    s.selling_price.to_string(),
                    s.profit().map(|p| p.to_string()).unwrap_or_default(),
                ]
            })
            .collect()
    }

    async fn customer_rows(&self) -> Vec<Vec<String>> {
        self.crm_repo
            .list_customers()
            .await
            .iter()
            .map(|c| {
                vec![
                    c.full_name.clone(),
                    c.email.clone().unwrap_or_default(),
                    c.phone.clone().unwrap_or_default(),
                    c.document_number.clone().unwrap_or_default(),
                ]
            })
            .collect()
    }

    pub async fn vehicles_csv(&self) -> String {
        csv_document(&VEHICLE_HEADER, &self.vehicle_rows().await)
    }

    pub async fn vehicles_xls(&self) -> String {
        xls_document(&VEHICLE_HEADER, &self.vehicle_rows().await)
    }

    pub async fn sales_csv(&self) -> String {
        csv_document(&SALE_HEADER, &self.sale_rows().await)
    }

    pub async fn sales_xls(&self) -> String {
        xls_document(&SALE_HEADER, &self.sale_rows().await)
    }

    pub async fn customers_csv(&self) -> String {
        csv_document(&CUSTOMER_HEADER, &self.customer_rows().await)
    }

    pub async fn customers_xls(&self) -> String {
        xls_document(&CUSTOMER_HEADER, &self.customer_rows().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_with_commas_are_quoted() {
        let line = csv_line(&["x,y".to_string(), "z".to_string()]);
        assert_eq!(line, "\"x,y\",z");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let line = csv_line(&["Corolla \"XEi\"".to_string()]);
        assert_eq!(line, "\"Corolla \"\"XEi\"\"\"");
    }

    #[test]
    fn newlines_force_quoting() {
        let line = csv_line(&["linha1\nlinha2".to_string()]);
        assert_eq!(line, "\"linha1\nlinha2\"");
    }

    #[test]
    fn plain_fields_are_left_alone() {
        let line = csv_line(&["abc".to_string(), "123".to_string()]);
        assert_eq!(line, "abc,123");
    }

    #[test]
    fn csv_document_has_header_and_one_line_per_row() {
        let doc = csv_document(
            &["a", "b"],
            &[vec!["1".to_string(), "x,y".to_string()]],
        );
        assert_eq!(doc, "a,b\n1,\"x,y\"\n");
    }

    #[test]
    fn xls_document_escapes_html() {
        let doc = xls_document(&["a"], &[vec!["<b>&\"".to_string()]]);
        assert!(doc.contains("<td>&lt;b&gt;&amp;&quot;</td>"));
    }
}
