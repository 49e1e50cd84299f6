//! 等待片段回應時顯示的立方體動畫標記。

const LAYERS: usize = 3;
const GRID: usize = 3;

/// 三層容器，每層 3x3 個立方體，每個立方體有上、左、右三個面
pub fn loading_markup() -> String {
    let mut html = String::from("<div class=\"container\">");

    for h in 1..=LAYERS {
        html.push_str(&format!("<div class=\"h{}Container\">", h));
        for w in 1..=GRID {
            for l in 1..=GRID {
                html.push_str(&format!(
                    "<div class=\"cube h{} w{} l{}\">\
                     <div class=\"face top\"></div>\
                     <div class=\"face left\"></div>\
                     <div class=\"face right\"></div>\
                     </div>",
                    h, w, l
                ));
            }
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}
