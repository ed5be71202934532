//! Canned pages for strategy tests.

/// Two labelled parcel blocks as rendered by the history page.
pub const LABELLED_PAGE: &str = r#"
<html><body>
  <div class="parcel-history">
    <div class="parcel-section">
      <div>290132647</div>
      <div>Package Code: 12345678</div>
      <div>Package Status: Picked up</div>
      <div>Locker Box #: 42 (Medium)</div>
      <div>Courier: USPS</div>
      <div>Delivered: 03/14/2024 10:15 AM</div>
      <div>Status Change: 03/15/2024 06:40 PM</div>
    </div>
    <div class="parcel-section">
      <div>Package Code: 87654321</div>
      <div>Package Status: Delivered</div>
      <div>Locker Box #: 7</div>
      <div>Courier: Amazon</div>
    </div>
  </div>
</body></html>
"#;

/// A tabular layout with a stray delivery notice that carries a label.
pub const TABLE_PAGE: &str = r#"
<html><body>
  <div class="delivery-notice">Courier: see table</div>
  <table>
    <tr><th>Code</th><th>Status</th><th>Locker</th><th>Carrier</th></tr>
    <tr class="parcel-row">
      <td class="package-code">11112222</td>
      <td class="status">Delivered</td>
      <td class="locker-box">12 (Small)</td>
      <td class="carrier">FedEx</td>
    </tr>
    <tr class="parcel-row">
      <td class="package-code">33334444</td>
      <td class="state">Picked Up</td>
      <td class="box">3</td>
      <td>Delivered: 03/01/2024</td>
    </tr>
  </table>
</body></html>
"#;

/// Labels without any parcel-flavored markup around them.
pub const ANCHOR_PAGE: &str = r#"
<html><body>
  <ul>
    <li>
      <p><span>Package Code:</span> <span>55556666</span></p>
      <p>Package Status: Delivered</p>
      <p>Courier: UPS Ground</p>
    </li>
    <li>
      <p><span>Package Code:</span> <span>77778888</span></p>
      <p>Package Status: Picked up</p>
    </li>
  </ul>
</body></html>
"#;

/// Parcel containers whose fields are only recoverable from free text.
pub const RAW_TEXT_PAGE: &str = r#"
<html><body>
  <div class="package-card">Shipped via FedEx to locker 14, size large.</div>
  <div class="package-card">Thank you for using our lockers.</div>
</body></html>
"#;

/// A page with nothing parcel-related on it.
pub const EMPTY_PAGE: &str = r#"
<html><body>
  <h1>Welcome</h1>
  <p>No results for the selected dates.</p>
</body></html>
"#;
