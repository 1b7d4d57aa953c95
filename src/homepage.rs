use crate::config::FormDefaults;

const PAGE_TEMPLATE: &str = r##"
    <!DOCTYPE html>
    <html>
    <head>
        <title>College Attendance Calculator</title>
        <meta charset="utf-8">
        <style>
            body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
            .container { background: #f5f5f5; padding: 25px; border-radius: 10px; }
            .card { background: white; border-radius: 12px; padding: 18px; box-shadow: 0 6px 18px rgba(0,0,0,0.06); margin: 15px 0; }
            .form-group { margin: 15px 0; }
            label { display: block; margin-bottom: 5px; font-weight: bold; }
            input { width: 100%; padding: 10px; border: 1px solid #ddd; border-radius: 4px; box-sizing: border-box; }
            button { background: #007bff; color: white; padding: 12px 24px; border: none; border-radius: 4px; cursor: pointer; margin: 5px 0; }
            button:hover { background: #0056b3; }
            .alert { padding: 12px 16px; border-radius: 5px; margin: 8px 0; }
            .error { background: #f8d7da; color: #721c24; border: 1px solid #f5c6cb; }
            .success { background: #d4edda; color: #155724; border: 1px solid #c3e6cb; }
            .warning { background: #fff3cd; color: #856404; border: 1px solid #ffeaa7; }
            .info { background: #d1ecf1; color: #0c5460; border: 1px solid #bee5eb; }
            .metric-label { font-size: 0.9rem; color: #666; margin: 0; }
            .metric-value { font-size: 32px; margin: 0; color: #007bff; }
            .progress { background: #e9ecef; border-radius: 6px; height: 14px; overflow: hidden; }
            .progress-bar { background: #28a745; height: 100%; }
            #results { display: none; }
        </style>
    </head>
    <body>
        <div class="container">
            <h1>📊 College Attendance Calculator</h1>
            <p>Calculate how many more classes you need to reach or maintain your target attendance percentage.</p>

            <form id="inputs" class="card" onsubmit="calculate(event)">
                <div class="form-group">
                    <label for="attended">Number of classes attended</label>
                    <input type="number" id="attended" min="0" step="1" value="{{ATTENDED}}" required>
                </div>

                <div class="form-group">
                    <label for="total">Total number of classes conducted</label>
                    <input type="number" id="total" min="1" step="1" value="{{TOTAL}}" required>
                </div>

                <div class="form-group">
                    <label for="target">Target attendance percentage</label>
                    <input type="number" id="target" min="1" max="100" step="0.01" value="{{TARGET}}" required>
                </div>

                <button type="submit">Calculate ✅</button>
            </form>

            <div id="results" class="card"></div>
        </div>

        <script>
            const ICONS = { error: '⚠️', warning: '⚠️', success: '✅', info: '📌' };

            function alertBox(level, message) {
                const div = document.createElement('div');
                div.className = 'alert ' + level;
                div.textContent = ICONS[level] + ' ' + message;
                return div;
            }

            async function calculate(event) {
                event.preventDefault();
                const attended = parseInt(document.getElementById('attended').value, 10);
                const total = parseInt(document.getElementById('total').value, 10);
                const target = parseFloat(document.getElementById('target').value);
                const resultsDiv = document.getElementById('results');
                resultsDiv.innerHTML = '';
                resultsDiv.style.display = 'block';

                try {
                    const response = await fetch('/calculate', {
                        method: 'POST',
                        headers: {'Content-Type': 'application/json'},
                        body: JSON.stringify({attended, total, target})
                    });
                    const data = await response.json();

                    if (!response.ok) {
                        data.errors.forEach(e => resultsDiv.appendChild(alertBox('error', e)));
                        return;
                    }

                    const metric = document.createElement('div');
                    metric.innerHTML = `
                        <p class="metric-label">Current attendance</p>
                        <p class="metric-value">${data.current_display}</p>
                    `;
                    resultsDiv.appendChild(metric);

                    data.alerts.forEach(a => resultsDiv.appendChild(alertBox(a.level, a.message)));

                    if (data.progress !== null) {
                        const progress = document.createElement('div');
                        progress.innerHTML = `
                            <p>Progress toward target:</p>
                            <div class="progress"><div class="progress-bar" style="width: ${(data.progress * 100).toFixed(1)}%"></div></div>
                        `;
                        resultsDiv.appendChild(progress);
                    }

                    if (data.chart !== null) {
                        const img = document.createElement('img');
                        const params = new URLSearchParams({attended, total, target});
                        img.src = '/chart.svg?' + params.toString();
                        img.alt = data.chart.title;
                        img.style.marginTop = '15px';
                        img.style.maxWidth = '100%';
                        resultsDiv.appendChild(img);
                    }

                    resultsDiv.scrollIntoView({behavior: 'smooth'});
                } catch (error) {
                    resultsDiv.appendChild(alertBox('error', 'Error: ' + error.message));
                }
            }
        </script>
    </body>
    </html>
    "##;

/// The calculator page with the configured form values filled in.
pub fn render(defaults: &FormDefaults) -> String {
    PAGE_TEMPLATE
        .replace("{{ATTENDED}}", &defaults.attended.to_string())
        .replace("{{TOTAL}}", &defaults.total.to_string())
        .replace("{{TARGET}}", &format!("{:.2}", defaults.target))
}
